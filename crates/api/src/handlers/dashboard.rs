//! Handler for the admin dashboard summary.
//!
//! One round of aggregate counts per project: units, residents, unpaid
//! bills, today's visitors, open maintenance requests, and unresolved
//! SOS alerts.

use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;
use veranda_core::roles::ROLE_RESIDENT;
use veranda_db::repositories::{BillRepo, MaintenanceRepo, SosRepo, UnitRepo, UserRepo, VisitorRepo};

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::query::ProjectScopeParams;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub units: i64,
    pub residents: i64,
    pub unpaid_bills: i64,
    pub visitors_today: i64,
    pub open_maintenance: i64,
    pub active_sos: i64,
}

/// GET /api/v1/dashboard
pub async fn summary(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(scope): Query<ProjectScopeParams>,
) -> AppResult<Json<ApiResponse<DashboardSummary>>> {
    let project_id = admin.project_scope(scope.project_id)?;

    let units = UnitRepo::count_by_project(&state.pool, project_id).await?;
    let residents = UserRepo::count_active_by_role(&state.pool, project_id, ROLE_RESIDENT).await?;
    let unpaid_bills = BillRepo::count_unpaid(&state.pool, project_id).await?;
    let visitors_today = VisitorRepo::count_today(&state.pool, project_id).await?;
    let open_maintenance = MaintenanceRepo::count_open(&state.pool, project_id).await?;
    let active_sos = SosRepo::count_active(&state.pool, project_id).await?;

    Ok(Json(ApiResponse::new(DashboardSummary {
        units,
        residents,
        unpaid_bills,
        visitors_today,
        open_maintenance,
        active_sos,
    })))
}

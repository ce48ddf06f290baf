//! Handlers for the `/bills` resource.
//!
//! Admins issue and settle bills; residents see the bills of their own unit.
//! Issuing a bill notifies the unit's residents.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use veranda_core::audit::{ACTION_BILL_CANCEL, ACTION_BILL_ISSUE, ACTION_BILL_PAY};
use veranda_core::error::CoreError;
use veranda_core::pagination::{clamp_limit, clamp_offset};
use veranda_core::roles::ROLE_RESIDENT;
use veranda_core::types::DbId;
use veranda_db::models::bill::{Bill, CreateBill};
use veranda_db::repositories::BillRepo;

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Query parameters for `GET /bills`.
#[derive(Debug, Deserialize)]
pub struct BillListParams {
    pub project_id: Option<DbId>,
    pub unit_id: Option<DbId>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for `POST /bills/{id}/pay`.
#[derive(Debug, Deserialize)]
pub struct PayBillRequest {
    /// External payment reference (receipt or transaction number).
    pub reference_no: Option<String>,
}

/// POST /api/v1/bills
///
/// Issue a bill against a unit. 201 Created.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(params): Query<BillListParams>,
    Json(input): Json<CreateBill>,
) -> AppResult<(StatusCode, Json<ApiResponse<Bill>>)> {
    let project_id = admin.project_scope(params.project_id)?;

    if input.amount_cents <= 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Bill amount must be positive".into(),
        )));
    }

    let unit = crate::handlers::units::find_scoped_unit(&state, &admin, input.unit_id).await?;
    if unit.project_id != project_id {
        return Err(AppError::Core(CoreError::Validation(
            "Unit belongs to another project".into(),
        )));
    }

    let bill = BillRepo::create(&state.pool, project_id, admin.user_id, &input).await?;

    audit::record(
        &state.pool,
        &admin,
        ACTION_BILL_ISSUE,
        "bill",
        Some(bill.id),
        Some(serde_json::json!({ "amount_cents": bill.amount_cents })),
    )
    .await;

    let body = format!(
        "A new {} bill of {} is due on {}.",
        bill.bill_type,
        format_amount(bill.amount_cents),
        bill.due_date
    );
    if let Err(err) = state
        .notifier
        .notify_unit_residents(bill.unit_id, "bill", "New bill issued", &body)
        .await
    {
        tracing::error!(error = %err, "Bill notification fan-out failed");
    }

    Ok((StatusCode::CREATED, Json(ApiResponse::new(bill))))
}

/// GET /api/v1/bills
///
/// Admins list the project's bills (optionally filtered by unit and status).
/// Residents always get the bills of their own unit.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<BillListParams>,
) -> AppResult<Json<ApiResponse<Vec<Bill>>>> {
    if user.role == ROLE_RESIDENT {
        let unit_id = super::resident_unit(&state, &user).await?;
        let bills = BillRepo::list_by_unit(&state.pool, unit_id, params.status.as_deref()).await?;
        return Ok(Json(ApiResponse::new(bills)));
    }

    let project_id = user.project_scope(params.project_id)?;
    let bills = BillRepo::list_by_project(
        &state.pool,
        project_id,
        params.unit_id,
        params.status.as_deref(),
        clamp_limit(params.limit),
        clamp_offset(params.offset),
    )
    .await?;
    Ok(Json(ApiResponse::new(bills)))
}

/// GET /api/v1/bills/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Bill>>> {
    let bill = find_scoped_bill(&state, &user, id).await?;
    Ok(Json(ApiResponse::new(bill)))
}

/// POST /api/v1/bills/{id}/pay
///
/// Record payment of a pending or overdue bill.
pub async fn pay(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<PayBillRequest>,
) -> AppResult<Json<ApiResponse<Bill>>> {
    find_scoped_bill(&state, &admin, id).await?;

    let bill = BillRepo::mark_paid(&state.pool, id, input.reference_no.as_deref())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Bill is not payable in its current status".into(),
            ))
        })?;

    audit::record(&state.pool, &admin, ACTION_BILL_PAY, "bill", Some(id), None).await;

    let body = format!(
        "Payment of {} received for your {} bill.",
        format_amount(bill.amount_cents),
        bill.bill_type
    );
    if let Err(err) = state
        .notifier
        .notify_unit_residents(bill.unit_id, "bill", "Payment received", &body)
        .await
    {
        tracing::error!(error = %err, "Payment notification fan-out failed");
    }

    Ok(Json(ApiResponse::new(bill)))
}

/// POST /api/v1/bills/{id}/cancel
///
/// Cancel an unpaid bill.
pub async fn cancel(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Bill>>> {
    find_scoped_bill(&state, &admin, id).await?;

    let bill = BillRepo::cancel(&state.pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "Only pending or overdue bills can be cancelled".into(),
        ))
    })?;

    audit::record(
        &state.pool,
        &admin,
        ACTION_BILL_CANCEL,
        "bill",
        Some(id),
        None,
    )
    .await;
    Ok(Json(ApiResponse::new(bill)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a bill and verify project scope. Residents may only see bills of
/// their own unit.
async fn find_scoped_bill(state: &AppState, user: &AuthUser, id: DbId) -> AppResult<Bill> {
    let bill = BillRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Bill", id }))?;
    user.check_project(bill.project_id)?;

    if user.role == ROLE_RESIDENT {
        let unit_id = super::resident_unit(state, user).await?;
        if bill.unit_id != unit_id {
            return Err(AppError::Core(CoreError::Forbidden(
                "Bill belongs to another unit".into(),
            )));
        }
    }
    Ok(bill)
}

/// Format an amount in cents as a decimal string, e.g. `150.00`.
fn format_amount(cents: i64) -> String {
    format!("{}.{:02}", cents / 100, (cents % 100).abs())
}

#[cfg(test)]
mod tests {
    use super::format_amount;

    #[test]
    fn amounts_render_with_two_decimals() {
        assert_eq!(format_amount(15000), "150.00");
        assert_eq!(format_amount(5), "0.05");
        assert_eq!(format_amount(1999), "19.99");
    }
}

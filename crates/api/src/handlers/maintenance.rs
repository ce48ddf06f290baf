//! Handlers for the `/maintenance` resource.
//!
//! Residents open requests; maintenance staff work them through the
//! lifecycle (`open` -> `in_progress` -> `resolved` -> `closed`, with
//! cancellation from the non-terminal states). The reporter is notified
//! whenever the status changes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use veranda_core::audit::{
    ACTION_MAINTENANCE_ASSIGN, ACTION_MAINTENANCE_OPEN, ACTION_MAINTENANCE_STATUS,
};
use veranda_core::error::CoreError;
use veranda_core::pagination::{clamp_limit, clamp_offset};
use veranda_core::roles::{ROLE_RESIDENT, STAFF_ROLES};
use veranda_core::types::DbId;
use veranda_db::models::maintenance::{
    is_valid_status_transition, CreateMaintenanceRequest, MaintenanceRequest,
};
use veranda_db::repositories::{MaintenanceRepo, RoleRepo, UserRepo};

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAuth, RequireMaintenanceStaff};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MaintenanceListParams {
    pub project_id: Option<DbId>,
    pub status: Option<String>,
    pub assigned_to: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    pub assigned_to: DbId,
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
}

/// POST /api/v1/maintenance
///
/// Open a maintenance request. Any authenticated user in the project may
/// report a problem. 201 Created.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(input): Json<CreateMaintenanceRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<MaintenanceRequest>>)> {
    let project_id = user.project_scope(None)?;

    if input.title.trim().is_empty() || input.description.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Title and description are required".into(),
        )));
    }
    if let Some(unit_id) = input.unit_id {
        let unit = crate::handlers::units::find_scoped_unit(&state, &user, unit_id).await?;
        if unit.project_id != project_id {
            return Err(AppError::Core(CoreError::Validation(
                "Unit belongs to another project".into(),
            )));
        }
    }

    let request = MaintenanceRepo::create(&state.pool, project_id, user.user_id, &input).await?;
    audit::record(
        &state.pool,
        &user,
        ACTION_MAINTENANCE_OPEN,
        "maintenance_request",
        Some(request.id),
        Some(json!({ "category": request.category })),
    )
    .await;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(request))))
}

/// GET /api/v1/maintenance
///
/// Residents see the requests they reported; staff see the project queue
/// with optional `status` and `assigned_to` filters.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<MaintenanceListParams>,
) -> AppResult<Json<ApiResponse<Vec<MaintenanceRequest>>>> {
    if user.role == ROLE_RESIDENT {
        let requests = MaintenanceRepo::list_by_reporter(&state.pool, user.user_id).await?;
        return Ok(Json(ApiResponse::new(requests)));
    }

    let project_id = user.project_scope(params.project_id)?;
    let requests = MaintenanceRepo::list_by_project(
        &state.pool,
        project_id,
        params.status.as_deref(),
        params.assigned_to,
        clamp_limit(params.limit),
        clamp_offset(params.offset),
    )
    .await?;
    Ok(Json(ApiResponse::new(requests)))
}

/// GET /api/v1/maintenance/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<MaintenanceRequest>>> {
    let request = find_scoped_request(&state, &user, id).await?;
    Ok(Json(ApiResponse::new(request)))
}

/// POST /api/v1/maintenance/{id}/assign
///
/// Hand the request to a staff member in the same project.
pub async fn assign(
    State(state): State<AppState>,
    RequireMaintenanceStaff(guard): RequireMaintenanceStaff,
    Path(id): Path<DbId>,
    Json(input): Json<AssignRequest>,
) -> AppResult<Json<ApiResponse<MaintenanceRequest>>> {
    let existing = find_scoped_request(&state, &guard, id).await?;

    let assignee = UserRepo::find_by_id(&state.pool, input.assigned_to)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.assigned_to,
        }))?;
    if assignee.project_id != Some(existing.project_id) {
        return Err(AppError::Core(CoreError::Validation(
            "Assignee belongs to another project".into(),
        )));
    }
    let role = RoleRepo::resolve_name(&state.pool, assignee.role_id).await?;
    if !STAFF_ROLES.contains(&role.as_str()) {
        return Err(AppError::Core(CoreError::Validation(
            "Assignee is not a staff member".into(),
        )));
    }

    let request = MaintenanceRepo::assign(&state.pool, id, input.assigned_to)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Maintenance request",
            id,
        }))?;

    audit::record(
        &state.pool,
        &guard,
        ACTION_MAINTENANCE_ASSIGN,
        "maintenance_request",
        Some(id),
        Some(json!({ "assigned_to": input.assigned_to })),
    )
    .await;
    Ok(Json(ApiResponse::new(request)))
}

/// POST /api/v1/maintenance/{id}/status
///
/// Advance the request through the lifecycle. Invalid transitions are
/// rejected with 409.
pub async fn set_status(
    State(state): State<AppState>,
    RequireMaintenanceStaff(guard): RequireMaintenanceStaff,
    Path(id): Path<DbId>,
    Json(input): Json<SetStatusRequest>,
) -> AppResult<Json<ApiResponse<MaintenanceRequest>>> {
    let existing = find_scoped_request(&state, &guard, id).await?;

    if !is_valid_status_transition(&existing.status, &input.status) {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot move request from '{}' to '{}'",
            existing.status, input.status
        ))));
    }

    let request = MaintenanceRepo::set_status(&state.pool, id, &existing.status, &input.status)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Request status changed; reload and retry".into(),
            ))
        })?;

    audit::record(
        &state.pool,
        &guard,
        ACTION_MAINTENANCE_STATUS,
        "maintenance_request",
        Some(id),
        Some(json!({ "from": existing.status, "to": request.status })),
    )
    .await;

    if let Some(reporter) = UserRepo::find_by_id(&state.pool, request.reported_by).await? {
        let body = format!(
            "Your request \"{}\" is now {}.",
            request.title, request.status
        );
        if let Err(err) = state
            .notifier
            .notify_user(
                reporter.id,
                Some(&reporter.email),
                "maintenance",
                "Maintenance request updated",
                &body,
            )
            .await
        {
            tracing::error!(error = %err, "Maintenance notification failed");
        }
    }

    Ok(Json(ApiResponse::new(request)))
}

/// Fetch a request and verify scope. Residents may only see their own.
async fn find_scoped_request(
    state: &AppState,
    user: &AuthUser,
    id: DbId,
) -> AppResult<MaintenanceRequest> {
    let request = MaintenanceRepo::find_by_id(&state.pool, id).await?.ok_or(
        AppError::Core(CoreError::NotFound {
            entity: "Maintenance request",
            id,
        }),
    )?;
    user.check_project(request.project_id)?;

    if user.role == ROLE_RESIDENT && request.reported_by != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Request was reported by another user".into(),
        )));
    }
    Ok(request)
}

//! Handlers for the `/sos` resource.
//!
//! SOS alerts are urgent calls for help. Raising one immediately fans
//! out to the project's security staff and admins; security acknowledges
//! and resolves.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use veranda_core::audit::{ACTION_SOS_ACKNOWLEDGE, ACTION_SOS_RAISE, ACTION_SOS_RESOLVE};
use veranda_core::error::CoreError;
use veranda_core::pagination::{clamp_limit, clamp_offset};
use veranda_core::roles::{ROLE_ADMIN, ROLE_RESIDENT, ROLE_SECURITY};
use veranda_core::types::DbId;
use veranda_db::models::sos::{CreateSosAlert, SosAlert};
use veranda_db::repositories::{SosRepo, UserRepo};

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAuth, RequireSecurity};
use crate::query::ScopedStatusListParams;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/sos
///
/// Raise an alert. Security staff and admins of the project are notified
/// immediately. 201 Created.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(input): Json<CreateSosAlert>,
) -> AppResult<(StatusCode, Json<ApiResponse<SosAlert>>)> {
    let project_id = user.project_scope(None)?;
    if input.alert_type.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Alert type is required".into(),
        )));
    }

    let unit_id = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .and_then(|u| u.unit_id);

    let alert = SosRepo::create(&state.pool, project_id, unit_id, user.user_id, &input).await?;
    audit::record(
        &state.pool,
        &user,
        ACTION_SOS_RAISE,
        "sos_alert",
        Some(alert.id),
        Some(json!({ "alert_type": alert.alert_type })),
    )
    .await;

    let body = match &alert.message {
        Some(msg) => format!("{} alert: {}", alert.alert_type, msg),
        None => format!("{} alert raised.", alert.alert_type),
    };
    for role in [ROLE_SECURITY, ROLE_ADMIN] {
        if let Err(err) = state
            .notifier
            .notify_project_role(project_id, role, "sos", "SOS alert", &body)
            .await
        {
            tracing::error!(error = %err, role, "SOS fan-out failed");
        }
    }

    Ok((StatusCode::CREATED, Json(ApiResponse::new(alert))))
}

/// GET /api/v1/sos
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ScopedStatusListParams>,
) -> AppResult<Json<ApiResponse<Vec<SosAlert>>>> {
    let project_id = user.project_scope(params.project_id)?;
    let mut alerts = SosRepo::list_by_project(
        &state.pool,
        project_id,
        params.status.as_deref(),
        clamp_limit(params.limit),
        clamp_offset(params.offset),
    )
    .await?;

    if user.role == ROLE_RESIDENT {
        alerts.retain(|a| a.raised_by == user.user_id);
    }
    Ok(Json(ApiResponse::new(alerts)))
}

/// GET /api/v1/sos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<SosAlert>>> {
    let alert = find_scoped_alert(&state, &user, id).await?;
    Ok(Json(ApiResponse::new(alert)))
}

/// POST /api/v1/sos/{id}/acknowledge
pub async fn acknowledge(
    State(state): State<AppState>,
    RequireSecurity(guard): RequireSecurity,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<SosAlert>>> {
    find_scoped_alert(&state, &guard, id).await?;

    let alert = SosRepo::acknowledge(&state.pool, id, guard.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Conflict("Alert is not active".into())))?;
    audit::record(
        &state.pool,
        &guard,
        ACTION_SOS_ACKNOWLEDGE,
        "sos_alert",
        Some(id),
        None,
    )
    .await;
    Ok(Json(ApiResponse::new(alert)))
}

/// POST /api/v1/sos/{id}/resolve
pub async fn resolve(
    State(state): State<AppState>,
    RequireSecurity(guard): RequireSecurity,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<SosAlert>>> {
    find_scoped_alert(&state, &guard, id).await?;

    let alert = SosRepo::resolve(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Conflict("Alert is already resolved".into())))?;
    audit::record(
        &state.pool,
        &guard,
        ACTION_SOS_RESOLVE,
        "sos_alert",
        Some(id),
        None,
    )
    .await;
    Ok(Json(ApiResponse::new(alert)))
}

/// Fetch an alert and verify scope. Residents may only see their own.
async fn find_scoped_alert(state: &AppState, user: &AuthUser, id: DbId) -> AppResult<SosAlert> {
    let alert = SosRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SOS alert",
            id,
        }))?;
    user.check_project(alert.project_id)?;

    if user.role == ROLE_RESIDENT && alert.raised_by != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Alert was raised by another user".into(),
        )));
    }
    Ok(alert)
}

//! Handlers for the `/patrol` resource.
//!
//! Admins manage the checkpoint map; guards scan checkpoint codes while
//! on their rounds. A scan against an unknown or deactivated code is
//! rejected so missed checkpoints show up in the log.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use veranda_core::audit::{
    ACTION_PATROL_CHECKPOINT_CREATE, ACTION_PATROL_CHECKPOINT_UPDATE, ACTION_PATROL_SCAN,
};
use veranda_core::error::CoreError;
use veranda_core::pagination::{clamp_limit, clamp_offset};
use veranda_core::types::{DbId, Timestamp};
use veranda_db::models::patrol::{
    CreateCheckpoint, CreatePatrolScan, PatrolCheckpoint, PatrolLog, UpdateCheckpoint,
};
use veranda_db::repositories::PatrolRepo;

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireSecurity};
use crate::query::ProjectScopeParams;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PatrolLogParams {
    pub project_id: Option<DbId>,
    pub guard_id: Option<DbId>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// POST /api/v1/patrol/checkpoints
pub async fn create_checkpoint(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(scope): Query<ProjectScopeParams>,
    Json(input): Json<CreateCheckpoint>,
) -> AppResult<(StatusCode, Json<ApiResponse<PatrolCheckpoint>>)> {
    let project_id = admin.project_scope(scope.project_id)?;
    if input.name.trim().is_empty() || input.code.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Checkpoint name and code are required".into(),
        )));
    }

    let checkpoint = PatrolRepo::create_checkpoint(&state.pool, project_id, &input).await?;
    audit::record(
        &state.pool,
        &admin,
        ACTION_PATROL_CHECKPOINT_CREATE,
        "patrol_checkpoint",
        Some(checkpoint.id),
        None,
    )
    .await;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(checkpoint))))
}

/// GET /api/v1/patrol/checkpoints
pub async fn list_checkpoints(
    State(state): State<AppState>,
    RequireSecurity(guard): RequireSecurity,
    Query(scope): Query<ProjectScopeParams>,
) -> AppResult<Json<ApiResponse<Vec<PatrolCheckpoint>>>> {
    let project_id = guard.project_scope(scope.project_id)?;
    let checkpoints = PatrolRepo::list_checkpoints(&state.pool, project_id).await?;
    Ok(Json(ApiResponse::new(checkpoints)))
}

/// PATCH /api/v1/patrol/checkpoints/{id}
pub async fn update_checkpoint(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCheckpoint>,
) -> AppResult<Json<ApiResponse<PatrolCheckpoint>>> {
    let existing = PatrolRepo::find_checkpoint(&state.pool, id).await?.ok_or(
        AppError::Core(CoreError::NotFound {
            entity: "Checkpoint",
            id,
        }),
    )?;
    admin.check_project(existing.project_id)?;

    let checkpoint = PatrolRepo::update_checkpoint(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Checkpoint",
            id,
        }))?;
    audit::record(
        &state.pool,
        &admin,
        ACTION_PATROL_CHECKPOINT_UPDATE,
        "patrol_checkpoint",
        Some(id),
        None,
    )
    .await;
    Ok(Json(ApiResponse::new(checkpoint)))
}

/// POST /api/v1/patrol/scans
///
/// Record a round scan by checkpoint code. 404 when the code is unknown
/// or the checkpoint has been deactivated.
pub async fn scan(
    State(state): State<AppState>,
    RequireSecurity(guard): RequireSecurity,
    Json(input): Json<CreatePatrolScan>,
) -> AppResult<(StatusCode, Json<ApiResponse<PatrolLog>>)> {
    let project_id = guard.project_scope(None)?;

    let checkpoint = PatrolRepo::find_active_by_code(&state.pool, project_id, &input.code)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "Unknown or inactive checkpoint code: {}",
                input.code
            )))
        })?;

    let log = PatrolRepo::insert_log(
        &state.pool,
        checkpoint.id,
        guard.user_id,
        input.note.as_deref(),
    )
    .await?;
    audit::record(
        &state.pool,
        &guard,
        ACTION_PATROL_SCAN,
        "patrol_checkpoint",
        Some(checkpoint.id),
        Some(json!({ "log_id": log.id })),
    )
    .await;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(log))))
}

/// GET /api/v1/patrol/logs
///
/// Scan history across a project's checkpoints, filterable by guard and
/// time range.
pub async fn list_logs(
    State(state): State<AppState>,
    RequireSecurity(guard): RequireSecurity,
    Query(params): Query<PatrolLogParams>,
) -> AppResult<Json<ApiResponse<Vec<PatrolLog>>>> {
    let project_id = guard.project_scope(params.project_id)?;
    let logs = PatrolRepo::list_logs(
        &state.pool,
        project_id,
        params.guard_id,
        params.from,
        params.to,
        clamp_limit(params.limit),
        clamp_offset(params.offset),
    )
    .await?;
    Ok(Json(ApiResponse::new(logs)))
}

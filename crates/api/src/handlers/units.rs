//! Handlers for the `/units` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use veranda_core::audit::{ACTION_UNIT_CREATE, ACTION_UNIT_DELETE, ACTION_UNIT_UPDATE};
use veranda_core::error::CoreError;
use veranda_core::types::DbId;
use veranda_db::models::unit::{CreateUnit, Unit, UpdateUnit};
use veranda_db::repositories::UnitRepo;

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::ProjectScopeParams;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/units
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(scope): Query<ProjectScopeParams>,
    Json(input): Json<CreateUnit>,
) -> AppResult<(StatusCode, Json<ApiResponse<Unit>>)> {
    let project_id = admin.project_scope(scope.project_id)?;
    let unit = UnitRepo::create(&state.pool, project_id, &input).await?;
    audit::record(
        &state.pool,
        &admin,
        ACTION_UNIT_CREATE,
        "unit",
        Some(unit.id),
        None,
    )
    .await;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(unit))))
}

/// GET /api/v1/units
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(scope): Query<ProjectScopeParams>,
) -> AppResult<Json<ApiResponse<Vec<Unit>>>> {
    let project_id = user.project_scope(scope.project_id)?;
    let units = UnitRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(ApiResponse::new(units)))
}

/// GET /api/v1/units/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Unit>>> {
    let unit = find_scoped_unit(&state, &user, id).await?;
    Ok(Json(ApiResponse::new(unit)))
}

/// PUT /api/v1/units/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUnit>,
) -> AppResult<Json<ApiResponse<Unit>>> {
    find_scoped_unit(&state, &admin, id).await?;
    let unit = UnitRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Unit", id }))?;
    audit::record(
        &state.pool,
        &admin,
        ACTION_UNIT_UPDATE,
        "unit",
        Some(id),
        None,
    )
    .await;
    Ok(Json(ApiResponse::new(unit)))
}

/// DELETE /api/v1/units/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    find_scoped_unit(&state, &admin, id).await?;
    let deleted = UnitRepo::soft_delete(&state.pool, id).await?;
    if deleted {
        audit::record(
            &state.pool,
            &admin,
            ACTION_UNIT_DELETE,
            "unit",
            Some(id),
            None,
        )
        .await;
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Unit", id }))
    }
}

/// Fetch a unit and verify it belongs to the caller's project.
pub(crate) async fn find_scoped_unit(
    state: &AppState,
    user: &AuthUser,
    id: DbId,
) -> AppResult<Unit> {
    let unit = UnitRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Unit", id }))?;
    user.check_project(unit.project_id)?;
    Ok(unit)
}

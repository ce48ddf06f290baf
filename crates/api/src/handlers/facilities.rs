//! Handlers for the `/facilities` resource.
//!
//! Facilities are the bookable (or not) shared amenities of a project.
//! Admins manage the catalogue; any authenticated user may browse it.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use veranda_core::audit::{
    ACTION_FACILITY_CREATE, ACTION_FACILITY_DELETE, ACTION_FACILITY_UPDATE,
};
use veranda_core::error::CoreError;
use veranda_core::types::DbId;
use veranda_db::models::facility::{CreateFacility, Facility, UpdateFacility};
use veranda_db::repositories::FacilityRepo;

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::ProjectScopeParams;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FacilityListParams {
    pub project_id: Option<DbId>,
    #[serde(default)]
    pub bookable_only: bool,
}

/// POST /api/v1/facilities
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(scope): Query<ProjectScopeParams>,
    Json(input): Json<CreateFacility>,
) -> AppResult<(StatusCode, Json<ApiResponse<Facility>>)> {
    let project_id = admin.project_scope(scope.project_id)?;
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Facility name is required".into(),
        )));
    }

    let facility = FacilityRepo::create(&state.pool, project_id, &input).await?;
    audit::record(
        &state.pool,
        &admin,
        ACTION_FACILITY_CREATE,
        "facility",
        Some(facility.id),
        None,
    )
    .await;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(facility))))
}

/// GET /api/v1/facilities
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<FacilityListParams>,
) -> AppResult<Json<ApiResponse<Vec<Facility>>>> {
    let project_id = user.project_scope(params.project_id)?;
    let facilities =
        FacilityRepo::list_by_project(&state.pool, project_id, params.bookable_only).await?;
    Ok(Json(ApiResponse::new(facilities)))
}

/// GET /api/v1/facilities/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Facility>>> {
    let facility = find_scoped_facility(&state, &user, id).await?;
    Ok(Json(ApiResponse::new(facility)))
}

/// PATCH /api/v1/facilities/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFacility>,
) -> AppResult<Json<ApiResponse<Facility>>> {
    find_scoped_facility(&state, &admin, id).await?;

    let facility = FacilityRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Facility",
            id,
        }))?;
    audit::record(
        &state.pool,
        &admin,
        ACTION_FACILITY_UPDATE,
        "facility",
        Some(id),
        None,
    )
    .await;
    Ok(Json(ApiResponse::new(facility)))
}

/// DELETE /api/v1/facilities/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    find_scoped_facility(&state, &admin, id).await?;

    if !FacilityRepo::soft_delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Facility",
            id,
        }));
    }
    audit::record(
        &state.pool,
        &admin,
        ACTION_FACILITY_DELETE,
        "facility",
        Some(id),
        None,
    )
    .await;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn find_scoped_facility(
    state: &AppState,
    user: &AuthUser,
    id: DbId,
) -> AppResult<Facility> {
    let facility = FacilityRepo::find_by_id(&state.pool, id).await?.ok_or(
        AppError::Core(CoreError::NotFound {
            entity: "Facility",
            id,
        }),
    )?;
    user.check_project(facility.project_id)?;
    Ok(facility)
}

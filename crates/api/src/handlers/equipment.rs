//! Handlers for the `/equipment` resource.
//!
//! The equipment register tracks shared machinery (lifts, pumps, gates)
//! and its service schedule. Maintenance staff own these records.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use veranda_core::audit::{
    ACTION_EQUIPMENT_CREATE, ACTION_EQUIPMENT_DELETE, ACTION_EQUIPMENT_UPDATE,
};
use veranda_core::error::CoreError;
use veranda_core::pagination::{clamp_limit, clamp_offset};
use veranda_core::types::DbId;
use veranda_db::models::equipment::{CreateEquipment, Equipment, UpdateEquipment};
use veranda_db::repositories::EquipmentRepo;

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireMaintenanceStaff;
use crate::query::ScopedStatusListParams;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/equipment
pub async fn create(
    State(state): State<AppState>,
    RequireMaintenanceStaff(guard): RequireMaintenanceStaff,
    Query(scope): Query<ScopedStatusListParams>,
    Json(input): Json<CreateEquipment>,
) -> AppResult<(StatusCode, Json<ApiResponse<Equipment>>)> {
    let project_id = guard.project_scope(scope.project_id)?;
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Equipment name is required".into(),
        )));
    }

    let equipment = EquipmentRepo::create(&state.pool, project_id, &input).await?;
    audit::record(
        &state.pool,
        &guard,
        ACTION_EQUIPMENT_CREATE,
        "equipment",
        Some(equipment.id),
        None,
    )
    .await;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(equipment))))
}

/// GET /api/v1/equipment
pub async fn list(
    State(state): State<AppState>,
    RequireMaintenanceStaff(guard): RequireMaintenanceStaff,
    Query(params): Query<ScopedStatusListParams>,
) -> AppResult<Json<ApiResponse<Vec<Equipment>>>> {
    let project_id = guard.project_scope(params.project_id)?;
    let items = EquipmentRepo::list_by_project(
        &state.pool,
        project_id,
        params.status.as_deref(),
        clamp_limit(params.limit),
        clamp_offset(params.offset),
    )
    .await?;
    Ok(Json(ApiResponse::new(items)))
}

/// GET /api/v1/equipment/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireMaintenanceStaff(guard): RequireMaintenanceStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Equipment>>> {
    let equipment = find_scoped_equipment(&state, &guard, id).await?;
    Ok(Json(ApiResponse::new(equipment)))
}

/// PATCH /api/v1/equipment/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireMaintenanceStaff(guard): RequireMaintenanceStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEquipment>,
) -> AppResult<Json<ApiResponse<Equipment>>> {
    find_scoped_equipment(&state, &guard, id).await?;

    let equipment = EquipmentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Equipment",
            id,
        }))?;
    audit::record(
        &state.pool,
        &guard,
        ACTION_EQUIPMENT_UPDATE,
        "equipment",
        Some(id),
        None,
    )
    .await;
    Ok(Json(ApiResponse::new(equipment)))
}

/// DELETE /api/v1/equipment/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireMaintenanceStaff(guard): RequireMaintenanceStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    find_scoped_equipment(&state, &guard, id).await?;

    if !EquipmentRepo::soft_delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Equipment",
            id,
        }));
    }
    audit::record(
        &state.pool,
        &guard,
        ACTION_EQUIPMENT_DELETE,
        "equipment",
        Some(id),
        None,
    )
    .await;
    Ok(StatusCode::NO_CONTENT)
}

async fn find_scoped_equipment(
    state: &AppState,
    user: &AuthUser,
    id: DbId,
) -> AppResult<Equipment> {
    let equipment = EquipmentRepo::find_by_id(&state.pool, id).await?.ok_or(
        AppError::Core(CoreError::NotFound {
            entity: "Equipment",
            id,
        }),
    )?;
    user.check_project(equipment.project_id)?;
    Ok(equipment)
}

//! Handlers for the `/parcels` resource.
//!
//! Security staff log parcels at the gate and mark them collected.
//! Residents see their unit's parcels. Logging a parcel notifies the
//! unit's residents to come pick it up.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use veranda_core::audit::{ACTION_PARCEL_COLLECT, ACTION_PARCEL_LOG};
use veranda_core::error::CoreError;
use veranda_core::pagination::{clamp_limit, clamp_offset};
use veranda_core::roles::ROLE_RESIDENT;
use veranda_core::types::DbId;
use veranda_db::models::parcel::{CollectParcel, CreateParcel, Parcel};
use veranda_db::repositories::ParcelRepo;

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAuth, RequireSecurity};
use crate::query::ScopedStatusListParams;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/parcels
///
/// Log a parcel received at the gate. 201 Created.
pub async fn create(
    State(state): State<AppState>,
    RequireSecurity(guard): RequireSecurity,
    Query(scope): Query<ScopedStatusListParams>,
    Json(input): Json<CreateParcel>,
) -> AppResult<(StatusCode, Json<ApiResponse<Parcel>>)> {
    let project_id = guard.project_scope(scope.project_id)?;

    let unit = crate::handlers::units::find_scoped_unit(&state, &guard, input.unit_id).await?;
    if unit.project_id != project_id {
        return Err(AppError::Core(CoreError::Validation(
            "Unit belongs to another project".into(),
        )));
    }

    let parcel = ParcelRepo::create(&state.pool, project_id, guard.user_id, &input).await?;
    audit::record(
        &state.pool,
        &guard,
        ACTION_PARCEL_LOG,
        "parcel",
        Some(parcel.id),
        None,
    )
    .await;

    let body = match &parcel.carrier {
        Some(carrier) => format!("A parcel from {carrier} is waiting at the gate."),
        None => "A parcel is waiting for you at the gate.".to_string(),
    };
    if let Err(err) = state
        .notifier
        .notify_unit_residents(parcel.unit_id, "parcel", "Parcel received", &body)
        .await
    {
        tracing::error!(error = %err, "Parcel notification fan-out failed");
    }

    Ok((StatusCode::CREATED, Json(ApiResponse::new(parcel))))
}

/// GET /api/v1/parcels
///
/// Staff see the project's parcel log; residents see their unit's parcels.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ScopedStatusListParams>,
) -> AppResult<Json<ApiResponse<Vec<Parcel>>>> {
    if user.role == ROLE_RESIDENT {
        let unit_id = super::resident_unit(&state, &user).await?;
        let parcels = ParcelRepo::list_by_unit(&state.pool, unit_id).await?;
        return Ok(Json(ApiResponse::new(parcels)));
    }

    let project_id = user.project_scope(params.project_id)?;
    let parcels = ParcelRepo::list_by_project(
        &state.pool,
        project_id,
        params.status.as_deref(),
        clamp_limit(params.limit),
        clamp_offset(params.offset),
    )
    .await?;
    Ok(Json(ApiResponse::new(parcels)))
}

/// GET /api/v1/parcels/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Parcel>>> {
    let parcel = find_scoped_parcel(&state, &user, id).await?;
    Ok(Json(ApiResponse::new(parcel)))
}

/// POST /api/v1/parcels/{id}/collect
///
/// Mark a parcel collected, recording who picked it up.
pub async fn collect(
    State(state): State<AppState>,
    RequireSecurity(guard): RequireSecurity,
    Path(id): Path<DbId>,
    Json(input): Json<CollectParcel>,
) -> AppResult<Json<ApiResponse<Parcel>>> {
    find_scoped_parcel(&state, &guard, id).await?;

    let parcel = ParcelRepo::mark_collected(&state.pool, id, input.collected_by_name.as_deref())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict("Parcel is already collected".into()))
        })?;

    audit::record(
        &state.pool,
        &guard,
        ACTION_PARCEL_COLLECT,
        "parcel",
        Some(id),
        None,
    )
    .await;
    Ok(Json(ApiResponse::new(parcel)))
}

/// Fetch a parcel and verify scope. Residents may only see their own unit's.
async fn find_scoped_parcel(state: &AppState, user: &AuthUser, id: DbId) -> AppResult<Parcel> {
    let parcel = ParcelRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Parcel",
            id,
        }))?;
    user.check_project(parcel.project_id)?;

    if user.role == ROLE_RESIDENT {
        let unit_id = super::resident_unit(state, user).await?;
        if parcel.unit_id != unit_id {
            return Err(AppError::Core(CoreError::Forbidden(
                "Parcel belongs to another unit".into(),
            )));
        }
    }
    Ok(parcel)
}

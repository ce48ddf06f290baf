//! Handlers for the `/visitors` resource.
//!
//! Security staff run the gate log; residents may pre-register guests for
//! their own unit and see their unit's visitor history. A gate check-in
//! notifies the unit's residents that their guest has arrived.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use veranda_core::audit::{
    ACTION_VISITOR_CHECK_IN, ACTION_VISITOR_CHECK_OUT, ACTION_VISITOR_REGISTER,
};
use veranda_core::error::CoreError;
use veranda_core::pagination::{clamp_limit, clamp_offset};
use veranda_core::roles::ROLE_RESIDENT;
use veranda_core::types::DbId;
use veranda_db::models::visitor::{CreateVisitor, Visitor};
use veranda_db::repositories::VisitorRepo;

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAuth, RequireSecurity};
use crate::query::ScopedStatusListParams;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/visitors
///
/// Register an expected visitor. Residents may only register against their
/// own unit; security staff may register for any unit in the project.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(scope): Query<ScopedStatusListParams>,
    Json(input): Json<CreateVisitor>,
) -> AppResult<(StatusCode, Json<ApiResponse<Visitor>>)> {
    let project_id = user.project_scope(scope.project_id)?;

    if user.role == ROLE_RESIDENT {
        let own_unit = super::resident_unit(&state, &user).await?;
        if input.unit_id != own_unit {
            return Err(AppError::Core(CoreError::Forbidden(
                "Residents can only register visitors for their own unit".into(),
            )));
        }
    } else {
        let unit = crate::handlers::units::find_scoped_unit(&state, &user, input.unit_id).await?;
        if unit.project_id != project_id {
            return Err(AppError::Core(CoreError::Validation(
                "Unit belongs to another project".into(),
            )));
        }
    }

    let visitor = VisitorRepo::create(&state.pool, project_id, user.user_id, &input).await?;
    audit::record(
        &state.pool,
        &user,
        ACTION_VISITOR_REGISTER,
        "visitor",
        Some(visitor.id),
        None,
    )
    .await;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(visitor))))
}

/// GET /api/v1/visitors
///
/// Staff see the project's gate log; residents see their unit's visitors.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ScopedStatusListParams>,
) -> AppResult<Json<ApiResponse<Vec<Visitor>>>> {
    if user.role == ROLE_RESIDENT {
        let unit_id = super::resident_unit(&state, &user).await?;
        let visitors = VisitorRepo::list_by_unit(&state.pool, unit_id).await?;
        return Ok(Json(ApiResponse::new(visitors)));
    }

    let project_id = user.project_scope(params.project_id)?;
    let visitors = VisitorRepo::list_by_project(
        &state.pool,
        project_id,
        params.status.as_deref(),
        clamp_limit(params.limit),
        clamp_offset(params.offset),
    )
    .await?;
    Ok(Json(ApiResponse::new(visitors)))
}

/// GET /api/v1/visitors/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Visitor>>> {
    let visitor = find_scoped_visitor(&state, &user, id).await?;
    Ok(Json(ApiResponse::new(visitor)))
}

/// POST /api/v1/visitors/{id}/check-in
///
/// Gate check-in. Only valid for visitors in `expected` status.
pub async fn check_in(
    State(state): State<AppState>,
    RequireSecurity(guard): RequireSecurity,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Visitor>>> {
    find_scoped_visitor(&state, &guard, id).await?;

    let visitor = VisitorRepo::check_in(&state.pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "Visitor is not awaiting check-in".into(),
        ))
    })?;

    audit::record(
        &state.pool,
        &guard,
        ACTION_VISITOR_CHECK_IN,
        "visitor",
        Some(id),
        None,
    )
    .await;

    let body = format!("{} has arrived at the gate.", visitor.name);
    if let Err(err) = state
        .notifier
        .notify_unit_residents(visitor.unit_id, "visitor", "Visitor arrived", &body)
        .await
    {
        tracing::error!(error = %err, "Visitor notification fan-out failed");
    }

    Ok(Json(ApiResponse::new(visitor)))
}

/// POST /api/v1/visitors/{id}/check-out
///
/// Gate check-out. Only valid for visitors in `checked_in` status.
pub async fn check_out(
    State(state): State<AppState>,
    RequireSecurity(guard): RequireSecurity,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Visitor>>> {
    find_scoped_visitor(&state, &guard, id).await?;

    let visitor = VisitorRepo::check_out(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict("Visitor is not checked in".into()))
        })?;

    audit::record(
        &state.pool,
        &guard,
        ACTION_VISITOR_CHECK_OUT,
        "visitor",
        Some(id),
        None,
    )
    .await;
    Ok(Json(ApiResponse::new(visitor)))
}

/// Fetch a visitor record and verify scope. Residents may only see records
/// for their own unit.
async fn find_scoped_visitor(state: &AppState, user: &AuthUser, id: DbId) -> AppResult<Visitor> {
    let visitor = VisitorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Visitor",
            id,
        }))?;
    user.check_project(visitor.project_id)?;

    if user.role == ROLE_RESIDENT {
        let unit_id = super::resident_unit(state, user).await?;
        if visitor.unit_id != unit_id {
            return Err(AppError::Core(CoreError::Forbidden(
                "Visitor record belongs to another unit".into(),
            )));
        }
    }
    Ok(visitor)
}

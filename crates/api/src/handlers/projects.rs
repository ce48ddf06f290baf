//! Handlers for the `/projects` resource.
//!
//! Creating and deleting projects is super-admin territory; a project admin
//! may read and update their own project and its settings.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use veranda_core::audit::{
    ACTION_PROJECT_CREATE, ACTION_PROJECT_DELETE, ACTION_PROJECT_SETTINGS_UPDATE,
    ACTION_PROJECT_UPDATE,
};
use veranda_core::error::CoreError;
use veranda_core::types::DbId;
use veranda_db::models::project::{CreateProject, Project, UpdateProject};
use veranda_db::repositories::ProjectRepo;

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth, RequireSuperAdmin};
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    RequireSuperAdmin(admin): RequireSuperAdmin,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<ApiResponse<Project>>)> {
    let project = ProjectRepo::create(&state.pool, &input).await?;
    audit::record(
        &state.pool,
        &admin,
        ACTION_PROJECT_CREATE,
        "project",
        Some(project.id),
        None,
    )
    .await;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(project))))
}

/// GET /api/v1/projects
///
/// Super admins see every project; everyone else sees just their own.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<ApiResponse<Vec<Project>>>> {
    let projects = match user.project_id {
        None => ProjectRepo::list(&state.pool).await?,
        Some(own) => ProjectRepo::find_by_id(&state.pool, own)
            .await?
            .into_iter()
            .collect(),
    };
    Ok(Json(ApiResponse::new(projects)))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Project>>> {
    user.check_project(id)?;
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(ApiResponse::new(project)))
}

/// PATCH /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<ApiResponse<Project>>> {
    admin.check_project(id)?;
    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    audit::record(
        &state.pool,
        &admin,
        ACTION_PROJECT_UPDATE,
        "project",
        Some(id),
        None,
    )
    .await;
    Ok(Json(ApiResponse::new(project)))
}

/// GET /api/v1/projects/{id}/settings
pub async fn get_settings(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    admin.check_project(id)?;
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(ApiResponse::new(project.settings)))
}

/// PUT /api/v1/projects/{id}/settings
///
/// Replace the project's settings document wholesale.
pub async fn update_settings(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(settings): Json<serde_json::Value>,
) -> AppResult<Json<ApiResponse<Project>>> {
    admin.check_project(id)?;

    if !settings.is_object() {
        return Err(AppError::Core(CoreError::Validation(
            "Settings must be a JSON object".into(),
        )));
    }

    let project = ProjectRepo::update_settings(&state.pool, id, &settings)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    audit::record(
        &state.pool,
        &admin,
        ACTION_PROJECT_SETTINGS_UPDATE,
        "project",
        Some(id),
        None,
    )
    .await;
    Ok(Json(ApiResponse::new(project)))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireSuperAdmin(admin): RequireSuperAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProjectRepo::soft_delete(&state.pool, id).await?;
    if deleted {
        audit::record(
            &state.pool,
            &admin,
            ACTION_PROJECT_DELETE,
            "project",
            Some(id),
            None,
        )
        .await;
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
    }
}

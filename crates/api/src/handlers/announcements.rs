//! Handlers for the `/announcements` resource.
//!
//! Residents read the board; admins write to it. Publishing an announcement
//! notifies every active resident of the project.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use veranda_core::audit::{
    ACTION_ANNOUNCEMENT_CREATE, ACTION_ANNOUNCEMENT_DELETE, ACTION_ANNOUNCEMENT_UPDATE,
};
use veranda_core::error::CoreError;
use veranda_core::pagination::{clamp_limit, clamp_offset};
use veranda_core::roles::ROLE_RESIDENT;
use veranda_core::types::DbId;
use veranda_db::models::announcement::{Announcement, CreateAnnouncement, UpdateAnnouncement};
use veranda_db::repositories::AnnouncementRepo;

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::ScopedStatusListParams;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/announcements
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(scope): Query<ScopedStatusListParams>,
    Json(input): Json<CreateAnnouncement>,
) -> AppResult<(StatusCode, Json<ApiResponse<Announcement>>)> {
    let project_id = admin.project_scope(scope.project_id)?;
    let announcement =
        AnnouncementRepo::create(&state.pool, project_id, admin.user_id, &input).await?;

    audit::record(
        &state.pool,
        &admin,
        ACTION_ANNOUNCEMENT_CREATE,
        "announcement",
        Some(announcement.id),
        None,
    )
    .await;

    if let Err(err) = state
        .notifier
        .notify_project_role(
            project_id,
            ROLE_RESIDENT,
            "announcement",
            &announcement.title,
            &announcement.body,
        )
        .await
    {
        tracing::error!(error = %err, "Announcement notification fan-out failed");
    }

    Ok((StatusCode::CREATED, Json(ApiResponse::new(announcement))))
}

/// GET /api/v1/announcements
///
/// Current (non-expired) announcements, pinned first.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ScopedStatusListParams>,
) -> AppResult<Json<ApiResponse<Vec<Announcement>>>> {
    let project_id = user.project_scope(params.project_id)?;
    let announcements = AnnouncementRepo::list_current(
        &state.pool,
        project_id,
        clamp_limit(params.limit),
        clamp_offset(params.offset),
    )
    .await?;
    Ok(Json(ApiResponse::new(announcements)))
}

/// GET /api/v1/announcements/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Announcement>>> {
    let announcement = AnnouncementRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Announcement",
            id,
        }))?;
    user.check_project(announcement.project_id)?;
    Ok(Json(ApiResponse::new(announcement)))
}

/// PUT /api/v1/announcements/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAnnouncement>,
) -> AppResult<Json<ApiResponse<Announcement>>> {
    let existing = AnnouncementRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Announcement",
            id,
        }))?;
    admin.check_project(existing.project_id)?;

    let announcement = AnnouncementRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Announcement",
            id,
        }))?;
    audit::record(
        &state.pool,
        &admin,
        ACTION_ANNOUNCEMENT_UPDATE,
        "announcement",
        Some(id),
        None,
    )
    .await;
    Ok(Json(ApiResponse::new(announcement)))
}

/// DELETE /api/v1/announcements/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = AnnouncementRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Announcement",
            id,
        }))?;
    admin.check_project(existing.project_id)?;

    let deleted = AnnouncementRepo::soft_delete(&state.pool, id).await?;
    if deleted {
        audit::record(
            &state.pool,
            &admin,
            ACTION_ANNOUNCEMENT_DELETE,
            "announcement",
            Some(id),
            None,
        )
        .await;
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Announcement",
            id,
        }))
    }
}

//! Handlers for the `/notifications` resource.
//!
//! A user's own in-app inbox. There is no cross-user access here; every
//! query is keyed by the authenticated user id.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use veranda_core::error::CoreError;
use veranda_core::pagination::{clamp_limit, clamp_offset};
use veranda_core::types::DbId;
use veranda_db::models::notification::Notification;
use veranda_db::repositories::NotificationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NotificationListParams {
    #[serde(default)]
    pub unread_only: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub unread: i64,
}

#[derive(Debug, Serialize)]
pub struct MarkedRead {
    pub marked: u64,
}

/// GET /api/v1/notifications
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<NotificationListParams>,
) -> AppResult<Json<ApiResponse<Vec<Notification>>>> {
    let notifications = NotificationRepo::list_for_user(
        &state.pool,
        user.user_id,
        params.unread_only,
        clamp_limit(params.limit),
        clamp_offset(params.offset),
    )
    .await?;
    Ok(Json(ApiResponse::new(notifications)))
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<ApiResponse<UnreadCount>>> {
    let unread = NotificationRepo::unread_count(&state.pool, user.user_id).await?;
    Ok(Json(ApiResponse::new(UnreadCount { unread })))
}

/// POST /api/v1/notifications/{id}/read
///
/// 404 when the notification does not exist, belongs to another user, or
/// is already read.
pub async fn mark_read(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<MarkedRead>>> {
    if !NotificationRepo::mark_read(&state.pool, id, user.user_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id,
        }));
    }
    Ok(Json(ApiResponse::new(MarkedRead { marked: 1 })))
}

/// POST /api/v1/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<ApiResponse<MarkedRead>>> {
    let marked = NotificationRepo::mark_all_read(&state.pool, user.user_id).await?;
    Ok(Json(ApiResponse::new(MarkedRead { marked })))
}

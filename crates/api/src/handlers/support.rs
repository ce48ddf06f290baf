//! Handlers for the `/support` resource.
//!
//! Residents open tickets with management. A reply from an admin marks
//! the ticket `answered`; a reply from the opener reopens it. Closing is
//! terminal. The opener is notified when staff reply.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use veranda_core::audit::{ACTION_SUPPORT_CLOSE, ACTION_SUPPORT_OPEN, ACTION_SUPPORT_REPLY};
use veranda_core::error::CoreError;
use veranda_core::pagination::{clamp_limit, clamp_offset};
use veranda_core::roles::ROLE_RESIDENT;
use veranda_core::types::DbId;
use veranda_db::models::support::{
    CreateSupportReply, CreateSupportTicket, SupportReply, SupportTicket,
};
use veranda_db::repositories::{SupportRepo, UserRepo};

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::ScopedStatusListParams;
use crate::response::ApiResponse;
use crate::state::AppState;

/// A ticket together with its conversation thread.
#[derive(Debug, Serialize)]
pub struct TicketThread {
    #[serde(flatten)]
    pub ticket: SupportTicket,
    pub replies: Vec<SupportReply>,
}

/// POST /api/v1/support
///
/// Open a support ticket. 201 Created.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(input): Json<CreateSupportTicket>,
) -> AppResult<(StatusCode, Json<ApiResponse<SupportTicket>>)> {
    let project_id = user.project_scope(None)?;
    if input.subject.trim().is_empty() || input.body.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Subject and body are required".into(),
        )));
    }

    let ticket = SupportRepo::create_ticket(&state.pool, project_id, user.user_id, &input).await?;
    audit::record(
        &state.pool,
        &user,
        ACTION_SUPPORT_OPEN,
        "support_ticket",
        Some(ticket.id),
        None,
    )
    .await;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(ticket))))
}

/// GET /api/v1/support
///
/// Residents see their own tickets; admins see the project queue with an
/// optional `status` filter.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ScopedStatusListParams>,
) -> AppResult<Json<ApiResponse<Vec<SupportTicket>>>> {
    if user.role == ROLE_RESIDENT {
        let tickets = SupportRepo::list_by_opener(&state.pool, user.user_id).await?;
        return Ok(Json(ApiResponse::new(tickets)));
    }

    let project_id = user.project_scope(params.project_id)?;
    let tickets = SupportRepo::list_by_project(
        &state.pool,
        project_id,
        params.status.as_deref(),
        clamp_limit(params.limit),
        clamp_offset(params.offset),
    )
    .await?;
    Ok(Json(ApiResponse::new(tickets)))
}

/// GET /api/v1/support/{id}
///
/// Fetch a ticket with its full reply thread.
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<TicketThread>>> {
    let ticket = find_scoped_ticket(&state, &user, id).await?;
    let replies = SupportRepo::list_replies(&state.pool, id).await?;
    Ok(Json(ApiResponse::new(TicketThread { ticket, replies })))
}

/// POST /api/v1/support/{id}/replies
///
/// Add a reply. Staff replies mark the ticket `answered`; the opener's
/// replies move it back to `open`. Closed tickets take no replies.
pub async fn add_reply(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
    Json(input): Json<CreateSupportReply>,
) -> AppResult<(StatusCode, Json<ApiResponse<SupportReply>>)> {
    let ticket = find_scoped_ticket(&state, &user, id).await?;
    if ticket.status == "closed" {
        return Err(AppError::Core(CoreError::Conflict(
            "Ticket is closed".into(),
        )));
    }
    if input.body.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Reply body is required".into(),
        )));
    }

    let from_opener = ticket.opened_by == user.user_id;
    let new_status = if from_opener { "open" } else { "answered" };
    let reply =
        SupportRepo::add_reply(&state.pool, id, user.user_id, &input.body, new_status).await?;
    audit::record(
        &state.pool,
        &user,
        ACTION_SUPPORT_REPLY,
        "support_ticket",
        Some(id),
        None,
    )
    .await;

    if !from_opener {
        if let Some(opener) = UserRepo::find_by_id(&state.pool, ticket.opened_by).await? {
            let body = format!("Your ticket \"{}\" has a new reply.", ticket.subject);
            if let Err(err) = state
                .notifier
                .notify_user(
                    opener.id,
                    Some(&opener.email),
                    "support",
                    "Support reply",
                    &body,
                )
                .await
            {
                tracing::error!(error = %err, "Support notification failed");
            }
        }
    }

    Ok((StatusCode::CREATED, Json(ApiResponse::new(reply))))
}

/// POST /api/v1/support/{id}/close
pub async fn close(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<SupportTicket>>> {
    find_scoped_ticket(&state, &admin, id).await?;

    let ticket = SupportRepo::close_ticket(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Conflict("Ticket is already closed".into())))?;
    audit::record(
        &state.pool,
        &admin,
        ACTION_SUPPORT_CLOSE,
        "support_ticket",
        Some(id),
        None,
    )
    .await;
    Ok(Json(ApiResponse::new(ticket)))
}

/// Fetch a ticket and verify scope. Residents may only see tickets they
/// opened.
async fn find_scoped_ticket(
    state: &AppState,
    user: &AuthUser,
    id: DbId,
) -> AppResult<SupportTicket> {
    let ticket = SupportRepo::find_ticket(&state.pool, id).await?.ok_or(
        AppError::Core(CoreError::NotFound {
            entity: "Support ticket",
            id,
        }),
    )?;
    user.check_project(ticket.project_id)?;

    if user.role == ROLE_RESIDENT && ticket.opened_by != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Ticket was opened by another user".into(),
        )));
    }
    Ok(ticket)
}

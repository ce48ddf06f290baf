//! Route definitions for the `/support` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::support;
use crate::state::AppState;

/// Routes mounted at `/support`.
///
/// ```text
/// GET    /               -> list
/// POST   /               -> create (open a ticket)
/// GET    /{id}           -> get_by_id (ticket + thread)
/// POST   /{id}/replies   -> add_reply
/// POST   /{id}/close     -> close (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(support::list).post(support::create))
        .route("/{id}", get(support::get_by_id))
        .route("/{id}/replies", post(support::add_reply))
        .route("/{id}/close", post(support::close))
}

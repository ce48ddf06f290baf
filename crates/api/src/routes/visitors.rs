//! Route definitions for the `/visitors` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::visitors;
use crate::state::AppState;

/// Routes mounted at `/visitors`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create (pre-register)
/// GET    /{id}            -> get_by_id
/// POST   /{id}/check-in   -> check_in (security)
/// POST   /{id}/check-out  -> check_out (security)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(visitors::list).post(visitors::create))
        .route("/{id}", get(visitors::get_by_id))
        .route("/{id}/check-in", post(visitors::check_in))
        .route("/{id}/check-out", post(visitors::check_out))
}

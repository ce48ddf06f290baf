//! Route definitions for the `/maintenance` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::maintenance;
use crate::state::AppState;

/// Routes mounted at `/maintenance`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create (open a request)
/// GET    /{id}          -> get_by_id
/// POST   /{id}/assign   -> assign (maintenance staff)
/// POST   /{id}/status   -> set_status (maintenance staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(maintenance::list).post(maintenance::create))
        .route("/{id}", get(maintenance::get_by_id))
        .route("/{id}/assign", post(maintenance::assign))
        .route("/{id}/status", post(maintenance::set_status))
}

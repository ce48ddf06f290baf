//! Route definitions for the `/sos` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::sos;
use crate::state::AppState;

/// Routes mounted at `/sos`.
///
/// ```text
/// GET    /                   -> list
/// POST   /                   -> create (raise an alert)
/// GET    /{id}               -> get_by_id
/// POST   /{id}/acknowledge   -> acknowledge (security)
/// POST   /{id}/resolve       -> resolve (security)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(sos::list).post(sos::create))
        .route("/{id}", get(sos::get_by_id))
        .route("/{id}/acknowledge", post(sos::acknowledge))
        .route("/{id}/resolve", post(sos::resolve))
}

//! Route definitions for the `/bills` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::bills;
use crate::state::AppState;

/// Routes mounted at `/bills`.
///
/// ```text
/// GET    /             -> list
/// POST   /             -> create (admin)
/// GET    /{id}         -> get_by_id
/// POST   /{id}/pay     -> pay
/// POST   /{id}/cancel  -> cancel (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(bills::list).post(bills::create))
        .route("/{id}", get(bills::get_by_id))
        .route("/{id}/pay", post(bills::pay))
        .route("/{id}/cancel", post(bills::cancel))
}

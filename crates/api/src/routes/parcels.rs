//! Route definitions for the `/parcels` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::parcels;
use crate::state::AppState;

/// Routes mounted at `/parcels`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create (security)
/// GET    /{id}          -> get_by_id
/// POST   /{id}/collect  -> collect (security)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(parcels::list).post(parcels::create))
        .route("/{id}", get(parcels::get_by_id))
        .route("/{id}/collect", post(parcels::collect))
}

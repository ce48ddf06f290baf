//! Route definitions for the `/equipment` resource.
//!
//! The whole register is maintenance-staff territory.

use axum::routing::get;
use axum::Router;

use crate::handlers::equipment;
use crate::state::AppState;

/// Routes mounted at `/equipment`.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create
/// GET    /{id}  -> get_by_id
/// PATCH  /{id}  -> update
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(equipment::list).post(equipment::create))
        .route(
            "/{id}",
            get(equipment::get_by_id)
                .patch(equipment::update)
                .delete(equipment::delete),
        )
}

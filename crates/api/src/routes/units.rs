//! Route definitions for the `/units` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::units;
use crate::state::AppState;

/// Routes mounted at `/units`.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create (admin)
/// GET    /{id}  -> get_by_id
/// PATCH  /{id}  -> update (admin)
/// DELETE /{id}  -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(units::list).post(units::create))
        .route(
            "/{id}",
            get(units::get_by_id)
                .patch(units::update)
                .delete(units::delete),
        )
}

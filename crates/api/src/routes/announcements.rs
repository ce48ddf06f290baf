//! Route definitions for the `/announcements` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::announcements;
use crate::state::AppState;

/// Routes mounted at `/announcements`.
///
/// ```text
/// GET    /      -> list (current, non-expired)
/// POST   /      -> create (admin)
/// GET    /{id}  -> get_by_id
/// PATCH  /{id}  -> update (admin)
/// DELETE /{id}  -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(announcements::list).post(announcements::create))
        .route(
            "/{id}",
            get(announcements::get_by_id)
                .patch(announcements::update)
                .delete(announcements::delete),
        )
}

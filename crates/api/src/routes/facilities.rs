//! Route definitions for the `/facilities` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::facilities;
use crate::state::AppState;

/// Routes mounted at `/facilities`.
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
        .route("/", get(facilities::list).post(facilities::create))
        .route(
            "/{id}",
            get(facilities::get_by_id)
                .patch(facilities::update)
                .delete(facilities::delete),
        )
}

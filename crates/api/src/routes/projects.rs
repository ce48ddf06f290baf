//! Route definitions for the `/projects` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::projects;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /               -> list
/// POST   /               -> create (super admin)
/// GET    /{id}           -> get_by_id
/// PATCH  /{id}           -> update
/// DELETE /{id}           -> delete (super admin)
/// GET    /{id}/settings  -> get_settings
/// PUT    /{id}/settings  -> update_settings
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::list).post(projects::create))
        .route(
            "/{id}",
            get(projects::get_by_id)
                .patch(projects::update)
                .delete(projects::delete),
        )
        .route(
            "/{id}/settings",
            get(projects::get_settings).put(projects::update_settings),
        )
}

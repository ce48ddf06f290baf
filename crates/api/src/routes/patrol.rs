//! Route definitions for the `/patrol` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::patrol;
use crate::state::AppState;

/// Routes mounted at `/patrol`.
///
/// ```text
/// GET    /checkpoints        -> list_checkpoints (security)
/// POST   /checkpoints        -> create_checkpoint (admin)
/// PATCH  /checkpoints/{id}   -> update_checkpoint (admin)
/// POST   /scans              -> scan (security)
/// GET    /logs               -> list_logs (security)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/checkpoints",
            get(patrol::list_checkpoints).post(patrol::create_checkpoint),
        )
        .route("/checkpoints/{id}", patch(patrol::update_checkpoint))
        .route("/scans", post(patrol::scan))
        .route("/logs", get(patrol::list_logs))
}

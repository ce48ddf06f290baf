//! Route definitions for the `/attendance` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::attendance;
use crate::state::AppState;

/// Routes mounted at `/attendance`.
///
/// ```text
/// GET    /            -> list (admin)
/// GET    /me          -> current_shift (staff)
/// POST   /check-in    -> check_in (staff)
/// POST   /check-out   -> check_out (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(attendance::list))
        .route("/me", get(attendance::current_shift))
        .route("/check-in", post(attendance::check_in))
        .route("/check-out", post(attendance::check_out))
}

//! Route definition for the admin dashboard.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET / -> summary (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(dashboard::summary))
}

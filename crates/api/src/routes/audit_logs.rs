//! Route definitions for the `/audit-logs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::audit_logs;
use crate::state::AppState;

/// Routes mounted at `/audit-logs`.
///
/// ```text
/// GET /         -> list (admin, project-scoped)
/// GET /export   -> export (super admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(audit_logs::list))
        .route("/export", get(audit_logs::export))
}

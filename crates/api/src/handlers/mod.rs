//! HTTP request handlers, one module per resource.

use veranda_core::error::CoreError;
use veranda_core::types::DbId;
use veranda_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Resolve the unit a resident caller is assigned to.
///
/// Acting on unit-bound resources (bills, bookings) requires residents to
/// have a unit assignment; an unassigned account gets a validation error.
pub(crate) async fn resident_unit(state: &AppState, user: &AuthUser) -> AppResult<DbId> {
    let row = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        }))?;
    row.unit_id.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "Account is not assigned to a unit".into(),
        ))
    })
}

pub mod announcements;
pub mod attendance;
pub mod audit_logs;
pub mod auth;
pub mod bills;
pub mod bookings;
pub mod dashboard;
pub mod equipment;
pub mod facilities;
pub mod maintenance;
pub mod notifications;
pub mod parcels;
pub mod patrol;
pub mod projects;
pub mod sos;
pub mod support;
pub mod units;
pub mod users;
pub mod visitors;

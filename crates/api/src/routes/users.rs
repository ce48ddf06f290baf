//! Route definitions for the `/users` resource.
//!
//! All endpoints require at least the `admin` role; `/all` requires
//! `super_admin`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /                     -> list_users
/// POST   /                     -> create_user
/// GET    /all                  -> list_all_users (super admin)
/// GET    /staff                -> list_staff
/// GET    /{id}                 -> get_user
/// PATCH  /{id}                 -> update_user
/// DELETE /{id}                 -> deactivate_user
/// POST   /{id}/reset-password  -> reset_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/all", get(users::list_all_users))
        .route("/staff", get(users::list_staff))
        .route(
            "/{id}",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::deactivate_user),
        )
        .route("/{id}/reset-password", post(users::reset_password))
}

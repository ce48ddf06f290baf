//! Route definitions for the `/bookings` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::bookings;
use crate::state::AppState;

/// Routes mounted at `/bookings`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create (resident request)
/// GET    /{id}          -> get_by_id
/// POST   /{id}/decide   -> decide (admin)
/// POST   /{id}/cancel   -> cancel (booker or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(bookings::list).post(bookings::create))
        .route("/{id}", get(bookings::get_by_id))
        .route("/{id}/decide", post(bookings::decide))
        .route("/{id}/cancel", post(bookings::cancel))
}

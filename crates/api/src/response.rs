//! Shared response envelope types for API handlers.
//!
//! Every successful response is wrapped in `{ "success": true, "data": ... }`;
//! the error side of the envelope is produced by `AppError`'s `IntoResponse`
//! impl. Use [`ApiResponse`] instead of ad-hoc `serde_json::json!` so the
//! payload shape is checked at compile time.

use serde::Serialize;

/// Standard `{ "success": true, "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap a payload in the success envelope.
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

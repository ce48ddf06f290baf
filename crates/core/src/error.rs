//! Domain-level error type shared across the workspace.

use crate::types::DbId;

/// Errors produced by domain logic, independent of the HTTP layer.
///
/// The api crate maps these onto HTTP statuses; repositories surface raw
/// `sqlx::Error` and let the api crate classify those separately.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity lookup by id came up empty.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed a domain validation rule.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The request conflicts with existing state (duplicates, overlaps,
    /// illegal status transitions).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The caller is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The caller is authenticated but not allowed to do this.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Something broke that the caller cannot fix.
    #[error("Internal error: {0}")]
    Internal(String),
}

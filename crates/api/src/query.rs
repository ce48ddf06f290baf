//! Shared query parameter types for API handlers.
//!
//! Common query structs that appear across multiple handler modules are
//! extracted here to avoid duplication.

use serde::Deserialize;
use veranda_core::types::{DbId, Timestamp};

/// Project selector for super admins (`?project_id=`).
///
/// Project-scoped users ignore this and always operate on their own project.
#[derive(Debug, Deserialize)]
pub struct ProjectScopeParams {
    pub project_id: Option<DbId>,
}

/// Project selector combined with a status filter and pagination.
#[derive(Debug, Deserialize)]
pub struct ScopedStatusListParams {
    pub project_id: Option<DbId>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Time-range filter (`?from=&to=`) with pagination.
#[derive(Debug, Deserialize)]
pub struct RangeListParams {
    pub project_id: Option<DbId>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

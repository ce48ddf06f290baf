//! Staff attendance model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use veranda_core::types::{DbId, Timestamp};

/// A row from the `attendance` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttendanceRecord {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub checked_in_at: Timestamp,
    pub checked_out_at: Option<Timestamp>,
    pub note: Option<String>,
}

/// DTO for checking in (optional shift note).
#[derive(Debug, Deserialize)]
pub struct CheckIn {
    pub note: Option<String>,
}

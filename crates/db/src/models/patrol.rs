//! Patrol checkpoint and scan-log models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use veranda_core::types::{DbId, Timestamp};

/// A row from the `patrol_checkpoints` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PatrolCheckpoint {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub location: Option<String>,
    /// Scan code, unique per project (printed as a QR at the checkpoint).
    pub code: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// A row from the `patrol_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PatrolLog {
    pub id: DbId,
    pub checkpoint_id: DbId,
    pub guard_id: DbId,
    pub scanned_at: Timestamp,
    pub note: Option<String>,
}

/// DTO for creating a checkpoint.
#[derive(Debug, Deserialize)]
pub struct CreateCheckpoint {
    pub name: String,
    pub location: Option<String>,
    pub code: String,
}

/// DTO for updating a checkpoint. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateCheckpoint {
    pub name: Option<String>,
    pub location: Option<String>,
    pub is_active: Option<bool>,
}

/// DTO for recording a scan by checkpoint code.
#[derive(Debug, Deserialize)]
pub struct CreatePatrolScan {
    pub code: String,
    pub note: Option<String>,
}

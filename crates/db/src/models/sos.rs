//! SOS alert entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use veranda_core::types::{DbId, Timestamp};

/// A row from the `sos_alerts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SosAlert {
    pub id: DbId,
    pub project_id: DbId,
    pub unit_id: Option<DbId>,
    pub raised_by: DbId,
    pub alert_type: String,
    pub message: Option<String>,
    pub status: String,
    pub acknowledged_by: Option<DbId>,
    pub acknowledged_at: Option<Timestamp>,
    pub resolved_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for raising an alert.
#[derive(Debug, Deserialize)]
pub struct CreateSosAlert {
    pub alert_type: String,
    pub message: Option<String>,
}

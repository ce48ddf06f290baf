//! Parcel entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use veranda_core::types::{DbId, Timestamp};

/// A row from the `parcels` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Parcel {
    pub id: DbId,
    pub project_id: DbId,
    pub unit_id: DbId,
    pub carrier: Option<String>,
    pub tracking_number: Option<String>,
    pub description: Option<String>,
    pub received_at: Timestamp,
    pub collected_at: Option<Timestamp>,
    pub collected_by_name: Option<String>,
    pub status: String,
    pub logged_by: DbId,
    pub created_at: Timestamp,
}

/// DTO for logging a received parcel.
#[derive(Debug, Deserialize)]
pub struct CreateParcel {
    pub unit_id: DbId,
    pub carrier: Option<String>,
    pub tracking_number: Option<String>,
    pub description: Option<String>,
}

/// DTO for marking a parcel collected.
#[derive(Debug, Deserialize)]
pub struct CollectParcel {
    /// Name of the person who picked the parcel up.
    pub collected_by_name: Option<String>,
}

//! Unit entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use veranda_core::types::{DbId, Timestamp};

/// A row from the `units` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Unit {
    pub id: DbId,
    pub project_id: DbId,
    pub unit_number: String,
    pub block: Option<String>,
    pub floor: Option<i32>,
    pub occupancy_status: String,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a unit within a project.
#[derive(Debug, Deserialize)]
pub struct CreateUnit {
    pub unit_number: String,
    pub block: Option<String>,
    pub floor: Option<i32>,
    pub occupancy_status: Option<String>,
}

/// DTO for updating a unit. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateUnit {
    pub unit_number: Option<String>,
    pub block: Option<String>,
    pub floor: Option<i32>,
    pub occupancy_status: Option<String>,
}

//! Visitor log entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use veranda_core::types::{DbId, Timestamp};

/// A row from the `visitors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Visitor {
    pub id: DbId,
    pub project_id: DbId,
    pub unit_id: DbId,
    pub name: String,
    pub id_number: Option<String>,
    pub vehicle_plate: Option<String>,
    pub purpose: Option<String>,
    pub expected_at: Option<Timestamp>,
    pub checked_in_at: Option<Timestamp>,
    pub checked_out_at: Option<Timestamp>,
    pub status: String,
    pub logged_by: DbId,
    pub created_at: Timestamp,
}

/// DTO for registering a visitor (pre-registration or walk-in).
#[derive(Debug, Deserialize)]
pub struct CreateVisitor {
    pub unit_id: DbId,
    pub name: String,
    pub id_number: Option<String>,
    pub vehicle_plate: Option<String>,
    pub purpose: Option<String>,
    pub expected_at: Option<Timestamp>,
}

//! Equipment register entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use veranda_core::types::{DbId, Timestamp};

/// A row from the `equipment` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Equipment {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub category: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub last_service_at: Option<Timestamp>,
    pub next_service_at: Option<Timestamp>,
    pub notes: Option<String>,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a piece of equipment.
#[derive(Debug, Deserialize)]
pub struct CreateEquipment {
    pub name: String,
    pub category: Option<String>,
    pub location: Option<String>,
    pub next_service_at: Option<Timestamp>,
    pub notes: Option<String>,
}

/// DTO for updating equipment. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateEquipment {
    pub name: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub last_service_at: Option<Timestamp>,
    pub next_service_at: Option<Timestamp>,
    pub notes: Option<String>,
}

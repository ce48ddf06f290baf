//! Project (village/condominium) entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use veranda_core::types::{DbId, Timestamp};

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub address: Option<String>,
    pub description: Option<String>,
    pub settings: serde_json::Value,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a project.
#[derive(Debug, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub address: Option<String>,
    pub description: Option<String>,
}

/// DTO for updating a project. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
}

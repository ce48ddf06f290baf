use serde::Serialize;
use sqlx::FromRow;
use veranda_core::types::{DbId, Timestamp};

/// A row from the `roles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Role {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
}

//! Announcement entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use veranda_core::types::{DbId, Timestamp};

/// A row from the `announcements` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Announcement {
    pub id: DbId,
    pub project_id: DbId,
    pub author_id: DbId,
    pub title: String,
    pub body: String,
    pub category: String,
    pub is_pinned: bool,
    pub expires_at: Option<Timestamp>,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an announcement.
#[derive(Debug, Deserialize)]
pub struct CreateAnnouncement {
    pub title: String,
    pub body: String,
    pub category: Option<String>,
    pub is_pinned: Option<bool>,
    pub expires_at: Option<Timestamp>,
}

/// DTO for updating an announcement. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateAnnouncement {
    pub title: Option<String>,
    pub body: Option<String>,
    pub category: Option<String>,
    pub is_pinned: Option<bool>,
    pub expires_at: Option<Timestamp>,
}

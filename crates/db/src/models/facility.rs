//! Facility entity model and DTOs.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use veranda_core::types::{DbId, Timestamp};

/// A row from the `facilities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Facility {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub capacity: Option<i32>,
    pub open_time: Option<NaiveTime>,
    pub close_time: Option<NaiveTime>,
    pub is_bookable: bool,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a facility.
#[derive(Debug, Deserialize)]
pub struct CreateFacility {
    pub name: String,
    pub description: Option<String>,
    pub capacity: Option<i32>,
    pub open_time: Option<NaiveTime>,
    pub close_time: Option<NaiveTime>,
    pub is_bookable: Option<bool>,
}

/// DTO for updating a facility. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateFacility {
    pub name: Option<String>,
    pub description: Option<String>,
    pub capacity: Option<i32>,
    pub open_time: Option<NaiveTime>,
    pub close_time: Option<NaiveTime>,
    pub is_bookable: Option<bool>,
}

//! Facility booking entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use veranda_core::types::{DbId, Timestamp};

/// A row from the `bookings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub facility_id: DbId,
    pub unit_id: DbId,
    pub booked_by: DbId,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub status: String,
    pub decided_by: Option<DbId>,
    pub decided_at: Option<Timestamp>,
    pub note: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for requesting a booking.
#[derive(Debug, Deserialize)]
pub struct CreateBooking {
    pub facility_id: DbId,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub note: Option<String>,
}

/// DTO for an admin decision on a pending booking.
#[derive(Debug, Deserialize)]
pub struct DecideBooking {
    /// `"approved"` or `"rejected"`.
    pub decision: String,
    pub note: Option<String>,
}

/// Outcome of an approval attempt.
#[derive(Debug)]
pub enum ApprovalOutcome {
    Approved(Booking),
    /// The window overlaps an already approved booking.
    SlotTaken,
    /// The booking does not exist or has already been settled.
    NotPending,
}

//! Bill entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use veranda_core::types::{DbId, Timestamp};

/// A row from the `bills` table. Amounts are cents, not fractional currency.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Bill {
    pub id: DbId,
    pub project_id: DbId,
    pub unit_id: DbId,
    pub bill_type: String,
    pub description: Option<String>,
    pub amount_cents: i64,
    pub due_date: NaiveDate,
    pub status: String,
    pub paid_at: Option<Timestamp>,
    pub reference_no: Option<String>,
    pub issued_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for issuing a bill to a unit.
#[derive(Debug, Deserialize)]
pub struct CreateBill {
    pub unit_id: DbId,
    pub bill_type: String,
    pub description: Option<String>,
    pub amount_cents: i64,
    pub due_date: NaiveDate,
}

/// DTO for recording a payment against a bill.
#[derive(Debug, Deserialize)]
pub struct PayBill {
    pub reference_no: Option<String>,
}

//! Support ticket and reply models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use veranda_core::types::{DbId, Timestamp};

/// A row from the `support_tickets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SupportTicket {
    pub id: DbId,
    pub project_id: DbId,
    pub opened_by: DbId,
    pub subject: String,
    pub body: String,
    pub status: String,
    pub closed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `support_replies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SupportReply {
    pub id: DbId,
    pub ticket_id: DbId,
    pub author_id: DbId,
    pub body: String,
    pub created_at: Timestamp,
}

/// DTO for opening a ticket.
#[derive(Debug, Deserialize)]
pub struct CreateSupportTicket {
    pub subject: String,
    pub body: String,
}

/// DTO for replying to a ticket.
#[derive(Debug, Deserialize)]
pub struct CreateSupportReply {
    pub body: String,
}

//! Maintenance request entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use veranda_core::types::{DbId, Timestamp};

/// A row from the `maintenance_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MaintenanceRequest {
    pub id: DbId,
    pub project_id: DbId,
    pub unit_id: Option<DbId>,
    pub reported_by: DbId,
    pub assigned_to: Option<DbId>,
    pub category: String,
    pub title: String,
    pub description: String,
    pub priority: String,
    pub status: String,
    pub resolved_at: Option<Timestamp>,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for opening a maintenance request.
#[derive(Debug, Deserialize)]
pub struct CreateMaintenanceRequest {
    pub unit_id: Option<DbId>,
    pub category: String,
    pub title: String,
    pub description: String,
    pub priority: Option<String>,
}

/// The ticket lifecycle. Transitions only move forward; `closed` and
/// `cancelled` are terminal.
pub fn is_valid_status_transition(from: &str, to: &str) -> bool {
    matches!(
        (from, to),
        ("open", "in_progress")
            | ("open", "cancelled")
            | ("in_progress", "resolved")
            | ("in_progress", "cancelled")
            | ("resolved", "closed")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_transitions_allowed() {
        assert!(is_valid_status_transition("open", "in_progress"));
        assert!(is_valid_status_transition("in_progress", "resolved"));
        assert!(is_valid_status_transition("resolved", "closed"));
        assert!(is_valid_status_transition("open", "cancelled"));
    }

    #[test]
    fn terminal_states_cannot_reopen() {
        assert!(!is_valid_status_transition("closed", "open"));
        assert!(!is_valid_status_transition("cancelled", "in_progress"));
        assert!(!is_valid_status_transition("resolved", "open"));
    }

    #[test]
    fn no_skipping_stages() {
        assert!(!is_valid_status_transition("open", "resolved"));
        assert!(!is_valid_status_transition("open", "closed"));
    }
}

//! Audit log models and query types.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use veranda_core::types::{DbId, Timestamp};

/// A row from the `audit_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditLog {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<DbId>,
    pub detail: Option<serde_json::Value>,
    pub ip_address: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for inserting an audit row.
#[derive(Debug)]
pub struct CreateAuditLog {
    pub user_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<DbId>,
    pub detail: Option<serde_json::Value>,
    pub ip_address: Option<String>,
}

/// Filter set for querying audit logs.
#[derive(Debug, Default, Deserialize)]
pub struct AuditQuery {
    pub user_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub action: Option<String>,
    pub entity_type: Option<String>,
    pub entity_id: Option<DbId>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// One page of audit results with the unpaginated total.
#[derive(Debug, Serialize)]
pub struct AuditLogPage {
    pub items: Vec<AuditLog>,
    pub total: i64,
}

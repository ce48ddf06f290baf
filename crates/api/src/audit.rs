//! Best-effort audit trail recording.
//!
//! Mutating handlers call [`record`] after the primary write succeeds. An
//! audit insert failure is logged and swallowed; it must never fail the
//! request that triggered it.

use veranda_core::types::DbId;
use veranda_db::models::audit::CreateAuditLog;
use veranda_db::repositories::AuditLogRepo;
use veranda_db::DbPool;

use crate::middleware::auth::AuthUser;

/// Record an audit log entry for an action performed by `user`.
pub async fn record(
    pool: &DbPool,
    user: &AuthUser,
    action: &str,
    entity_type: &str,
    entity_id: Option<DbId>,
    detail: Option<serde_json::Value>,
) {
    let entry = CreateAuditLog {
        user_id: Some(user.user_id),
        project_id: user.project_id,
        action: action.to_string(),
        entity_type: entity_type.to_string(),
        entity_id,
        detail,
        ip_address: None,
    };
    if let Err(err) = AuditLogRepo::insert(pool, &entry).await {
        tracing::error!(action, error = %err, "Failed to record audit log entry");
    }
}

//! Repository for the `audit_logs` table.

use sqlx::PgPool;
use veranda_core::pagination::{clamp_limit, clamp_offset};
use veranda_core::types::Timestamp;

use crate::models::audit::{AuditLog, AuditQuery, CreateAuditLog};

/// Column list for `audit_logs` queries.
const COLUMNS: &str =
    "id, user_id, project_id, action, entity_type, entity_id, detail, ip_address, created_at";

/// Shared WHERE clause for [`AuditLogRepo::query`] and [`AuditLogRepo::count`].
const FILTERS: &str = "($1::bigint IS NULL OR user_id = $1) \
     AND ($2::bigint IS NULL OR project_id = $2) \
     AND ($3::text IS NULL OR action = $3) \
     AND ($4::text IS NULL OR entity_type = $4) \
     AND ($5::bigint IS NULL OR entity_id = $5) \
     AND ($6::timestamptz IS NULL OR created_at >= $6) \
     AND ($7::timestamptz IS NULL OR created_at <= $7)";

/// Provides insert and query operations for the audit log.
pub struct AuditLogRepo;

impl AuditLogRepo {
    /// Insert an audit row.
    pub async fn insert(pool: &PgPool, input: &CreateAuditLog) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO audit_logs \
                (user_id, project_id, action, entity_type, entity_id, detail, ip_address) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(input.user_id)
        .bind(input.project_id)
        .bind(&input.action)
        .bind(&input.entity_type)
        .bind(input.entity_id)
        .bind(&input.detail)
        .bind(&input.ip_address)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Query audit rows with filters and pagination, newest first.
    pub async fn query(pool: &PgPool, q: &AuditQuery) -> Result<Vec<AuditLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM audit_logs \
             WHERE {FILTERS} \
             ORDER BY created_at DESC \
             LIMIT $8 OFFSET $9"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(q.user_id)
            .bind(q.project_id)
            .bind(&q.action)
            .bind(&q.entity_type)
            .bind(q.entity_id)
            .bind(q.from)
            .bind(q.to)
            .bind(clamp_limit(q.limit))
            .bind(clamp_offset(q.offset))
            .fetch_all(pool)
            .await
    }

    /// Count the rows matching a query, ignoring pagination.
    pub async fn count(pool: &PgPool, q: &AuditQuery) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM audit_logs WHERE {FILTERS}");
        let count: Option<i64> = sqlx::query_scalar(&query)
            .bind(q.user_id)
            .bind(q.project_id)
            .bind(&q.action)
            .bind(&q.entity_type)
            .bind(q.entity_id)
            .bind(q.from)
            .bind(q.to)
            .fetch_one(pool)
            .await?;
        Ok(count.unwrap_or(0))
    }

    /// Fetch every row in a date range, oldest first. Used for exports.
    pub async fn export_range(
        pool: &PgPool,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<AuditLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM audit_logs \
             WHERE created_at >= $1 AND created_at <= $2 \
             ORDER BY created_at"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }
}

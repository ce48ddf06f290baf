//! Repository for the `sos_alerts` table.

use sqlx::PgPool;
use veranda_core::types::DbId;

use crate::models::sos::{CreateSosAlert, SosAlert};

/// Column list for `sos_alerts` queries.
const COLUMNS: &str = "id, project_id, unit_id, raised_by, alert_type, message, status, \
     acknowledged_by, acknowledged_at, resolved_at, created_at";

/// Provides CRUD operations for SOS alerts.
pub struct SosRepo;

impl SosRepo {
    /// Raise an alert, returning the created row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        unit_id: Option<DbId>,
        raised_by: DbId,
        input: &CreateSosAlert,
    ) -> Result<SosAlert, sqlx::Error> {
        let query = format!(
            "INSERT INTO sos_alerts (project_id, unit_id, raised_by, alert_type, message)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SosAlert>(&query)
            .bind(project_id)
            .bind(unit_id)
            .bind(raised_by)
            .bind(&input.alert_type)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    /// Find an alert by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SosAlert>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sos_alerts WHERE id = $1");
        sqlx::query_as::<_, SosAlert>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's alerts with an optional status filter, newest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<SosAlert>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sos_alerts \
             WHERE project_id = $1 AND ($2::text IS NULL OR status = $2) \
             ORDER BY created_at DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, SosAlert>(&query)
            .bind(project_id)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Acknowledge an active alert.
    ///
    /// Returns `None` if the alert does not exist or is not `active`.
    pub async fn acknowledge(
        pool: &PgPool,
        id: DbId,
        acknowledged_by: DbId,
    ) -> Result<Option<SosAlert>, sqlx::Error> {
        let query = format!(
            "UPDATE sos_alerts SET status = 'acknowledged', acknowledged_by = $2, acknowledged_at = NOW()
             WHERE id = $1 AND status = 'active'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SosAlert>(&query)
            .bind(id)
            .bind(acknowledged_by)
            .fetch_optional(pool)
            .await
    }

    /// Resolve an active or acknowledged alert.
    ///
    /// Returns `None` if the alert does not exist or is already resolved.
    pub async fn resolve(pool: &PgPool, id: DbId) -> Result<Option<SosAlert>, sqlx::Error> {
        let query = format!(
            "UPDATE sos_alerts SET status = 'resolved', resolved_at = NOW()
             WHERE id = $1 AND status IN ('active', 'acknowledged')
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SosAlert>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Count a project's unresolved alerts.
    pub async fn count_active(pool: &PgPool, project_id: DbId) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sos_alerts \
             WHERE project_id = $1 AND status IN ('active', 'acknowledged')",
        )
        .bind(project_id)
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }
}

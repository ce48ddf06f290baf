//! Repository for the `maintenance_requests` table.

use sqlx::PgPool;
use veranda_core::types::DbId;

use crate::models::maintenance::{CreateMaintenanceRequest, MaintenanceRequest};

/// Column list for `maintenance_requests` queries.
const COLUMNS: &str = "id, project_id, unit_id, reported_by, assigned_to, category, title, \
     description, priority, status, resolved_at, deleted_at, created_at, updated_at";

/// Provides CRUD operations for maintenance requests.
pub struct MaintenanceRepo;

impl MaintenanceRepo {
    /// Open a new request, returning the created row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        reported_by: DbId,
        input: &CreateMaintenanceRequest,
    ) -> Result<MaintenanceRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO maintenance_requests \
                (project_id, unit_id, reported_by, category, title, description, priority)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 'medium'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaintenanceRequest>(&query)
            .bind(project_id)
            .bind(input.unit_id)
            .bind(reported_by)
            .bind(&input.category)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.priority)
            .fetch_one(pool)
            .await
    }

    /// Find a request by id. Excludes soft-deleted rows.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MaintenanceRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM maintenance_requests WHERE id = $1 AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, MaintenanceRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's requests with optional status and assignee filters,
    /// newest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
        status: Option<&str>,
        assigned_to: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MaintenanceRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM maintenance_requests \
             WHERE project_id = $1 AND deleted_at IS NULL \
               AND ($2::text IS NULL OR status = $2) \
               AND ($3::bigint IS NULL OR assigned_to = $3) \
             ORDER BY created_at DESC \
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, MaintenanceRequest>(&query)
            .bind(project_id)
            .bind(status)
            .bind(assigned_to)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List the requests a user reported, newest first.
    pub async fn list_by_reporter(
        pool: &PgPool,
        reported_by: DbId,
    ) -> Result<Vec<MaintenanceRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM maintenance_requests \
             WHERE reported_by = $1 AND deleted_at IS NULL \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, MaintenanceRequest>(&query)
            .bind(reported_by)
            .fetch_all(pool)
            .await
    }

    /// Assign a request to a staff member.
    pub async fn assign(
        pool: &PgPool,
        id: DbId,
        assigned_to: DbId,
    ) -> Result<Option<MaintenanceRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE maintenance_requests SET assigned_to = $2, updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaintenanceRequest>(&query)
            .bind(id)
            .bind(assigned_to)
            .fetch_optional(pool)
            .await
    }

    /// Set the request status. `resolved_at` is stamped when moving to
    /// `resolved`. The update only applies while the row still holds
    /// `expected`, so a transition validated against a stale read cannot
    /// land on a row another caller has already moved.
    ///
    /// Returns `None` if the row is missing, deleted, or no longer in
    /// `expected`.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        expected: &str,
        status: &str,
    ) -> Result<Option<MaintenanceRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE maintenance_requests SET
                status = $3,
                resolved_at = CASE WHEN $3 = 'resolved' THEN NOW() ELSE resolved_at END,
                updated_at = NOW()
             WHERE id = $1 AND status = $2 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaintenanceRequest>(&query)
            .bind(id)
            .bind(expected)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Count a project's open or in-progress requests.
    pub async fn count_open(pool: &PgPool, project_id: DbId) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM maintenance_requests \
             WHERE project_id = $1 AND status IN ('open', 'in_progress') AND deleted_at IS NULL",
        )
        .bind(project_id)
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }
}

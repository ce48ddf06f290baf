//! Repository for the `visitors` table.

use sqlx::PgPool;
use veranda_core::types::DbId;

use crate::models::visitor::{CreateVisitor, Visitor};

/// Column list for `visitors` queries.
const COLUMNS: &str = "id, project_id, unit_id, name, id_number, vehicle_plate, purpose, \
     expected_at, checked_in_at, checked_out_at, status, logged_by, created_at";

/// Provides CRUD operations for visitor logs.
pub struct VisitorRepo;

impl VisitorRepo {
    /// Register a visitor. For a walk-in, `check_in` follows immediately.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        logged_by: DbId,
        input: &CreateVisitor,
    ) -> Result<Visitor, sqlx::Error> {
        let query = format!(
            "INSERT INTO visitors (project_id, unit_id, name, id_number, vehicle_plate, purpose, expected_at, logged_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Visitor>(&query)
            .bind(project_id)
            .bind(input.unit_id)
            .bind(&input.name)
            .bind(&input.id_number)
            .bind(&input.vehicle_plate)
            .bind(&input.purpose)
            .bind(input.expected_at)
            .bind(logged_by)
            .fetch_one(pool)
            .await
    }

    /// Find a visitor record by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Visitor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM visitors WHERE id = $1");
        sqlx::query_as::<_, Visitor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's visitor records with an optional status filter,
    /// newest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Visitor>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM visitors \
             WHERE project_id = $1 AND ($2::text IS NULL OR status = $2) \
             ORDER BY created_at DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Visitor>(&query)
            .bind(project_id)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List a unit's visitor records, newest first.
    pub async fn list_by_unit(pool: &PgPool, unit_id: DbId) -> Result<Vec<Visitor>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM visitors WHERE unit_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Visitor>(&query)
            .bind(unit_id)
            .fetch_all(pool)
            .await
    }

    /// Check an expected visitor in at the gate.
    ///
    /// Returns `None` if the record does not exist or is not `expected`.
    pub async fn check_in(pool: &PgPool, id: DbId) -> Result<Option<Visitor>, sqlx::Error> {
        let query = format!(
            "UPDATE visitors SET status = 'checked_in', checked_in_at = NOW()
             WHERE id = $1 AND status = 'expected'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Visitor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Check a visitor out.
    ///
    /// Returns `None` if the record does not exist or is not `checked_in`.
    pub async fn check_out(pool: &PgPool, id: DbId) -> Result<Option<Visitor>, sqlx::Error> {
        let query = format!(
            "UPDATE visitors SET status = 'checked_out', checked_out_at = NOW()
             WHERE id = $1 AND status = 'checked_in'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Visitor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Count today's visitors for a project (checked in or registered today).
    pub async fn count_today(pool: &PgPool, project_id: DbId) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM visitors \
             WHERE project_id = $1 AND created_at >= CURRENT_DATE",
        )
        .bind(project_id)
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }
}

//! Repository for the `units` table.

use sqlx::PgPool;
use veranda_core::types::DbId;

use crate::models::unit::{CreateUnit, Unit, UpdateUnit};

/// Column list for `units` queries.
const COLUMNS: &str =
    "id, project_id, unit_number, block, floor, occupancy_status, deleted_at, created_at, updated_at";

/// Provides CRUD operations for units.
pub struct UnitRepo;

impl UnitRepo {
    /// Insert a new unit within a project, returning the created row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateUnit,
    ) -> Result<Unit, sqlx::Error> {
        let query = format!(
            "INSERT INTO units (project_id, unit_number, block, floor, occupancy_status)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'vacant'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Unit>(&query)
            .bind(project_id)
            .bind(&input.unit_number)
            .bind(&input.block)
            .bind(input.floor)
            .bind(&input.occupancy_status)
            .fetch_one(pool)
            .await
    }

    /// Find a unit by id. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Unit>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM units WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Unit>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's units ordered by unit number. Excludes soft-deleted rows.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Unit>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM units \
             WHERE project_id = $1 AND deleted_at IS NULL \
             ORDER BY unit_number"
        );
        sqlx::query_as::<_, Unit>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a unit. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUnit,
    ) -> Result<Option<Unit>, sqlx::Error> {
        let query = format!(
            "UPDATE units SET
                unit_number = COALESCE($2, unit_number),
                block = COALESCE($3, block),
                floor = COALESCE($4, floor),
                occupancy_status = COALESCE($5, occupancy_status),
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Unit>(&query)
            .bind(id)
            .bind(&input.unit_number)
            .bind(&input.block)
            .bind(input.floor)
            .bind(&input.occupancy_status)
            .fetch_optional(pool)
            .await
    }

    /// Count live units in a project.
    pub async fn count_by_project(pool: &PgPool, project_id: DbId) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM units WHERE project_id = $1 AND deleted_at IS NULL",
        )
        .bind(project_id)
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }

    /// Soft-delete a unit. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE units SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}

//! Repository for the `facilities` table.

use sqlx::PgPool;
use veranda_core::types::DbId;

use crate::models::facility::{CreateFacility, Facility, UpdateFacility};

/// Column list for `facilities` queries.
const COLUMNS: &str = "id, project_id, name, description, capacity, open_time, close_time, \
     is_bookable, deleted_at, created_at, updated_at";

/// Provides CRUD operations for facilities.
pub struct FacilityRepo;

impl FacilityRepo {
    /// Create a facility, returning the created row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateFacility,
    ) -> Result<Facility, sqlx::Error> {
        let query = format!(
            "INSERT INTO facilities (project_id, name, description, capacity, open_time, close_time, is_bookable)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Facility>(&query)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.capacity)
            .bind(input.open_time)
            .bind(input.close_time)
            .bind(input.is_bookable)
            .fetch_one(pool)
            .await
    }

    /// Find a facility by id. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Facility>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM facilities WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Facility>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's facilities. When `bookable_only` is set, only
    /// facilities currently open for booking are returned.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
        bookable_only: bool,
    ) -> Result<Vec<Facility>, sqlx::Error> {
        let filter = if bookable_only { "AND is_bookable" } else { "" };
        let query = format!(
            "SELECT {COLUMNS} FROM facilities \
             WHERE project_id = $1 AND deleted_at IS NULL {filter} \
             ORDER BY name"
        );
        sqlx::query_as::<_, Facility>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a facility. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFacility,
    ) -> Result<Option<Facility>, sqlx::Error> {
        let query = format!(
            "UPDATE facilities SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                capacity = COALESCE($4, capacity),
                open_time = COALESCE($5, open_time),
                close_time = COALESCE($6, close_time),
                is_bookable = COALESCE($7, is_bookable),
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Facility>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.capacity)
            .bind(input.open_time)
            .bind(input.close_time)
            .bind(input.is_bookable)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a facility. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE facilities SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

//! Repository for the `equipment` table.

use sqlx::PgPool;
use veranda_core::types::DbId;

use crate::models::equipment::{CreateEquipment, Equipment, UpdateEquipment};

/// Column list for `equipment` queries.
const COLUMNS: &str = "id, project_id, name, category, location, status, last_service_at, \
     next_service_at, notes, deleted_at, created_at, updated_at";

/// Provides CRUD operations for the equipment register.
pub struct EquipmentRepo;

impl EquipmentRepo {
    /// Register new equipment, returning the created row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateEquipment,
    ) -> Result<Equipment, sqlx::Error> {
        let query = format!(
            "INSERT INTO equipment (project_id, name, category, location, next_service_at, notes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.location)
            .bind(input.next_service_at)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find equipment by id. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Equipment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM equipment WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Equipment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's equipment with an optional status filter.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Equipment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM equipment \
             WHERE project_id = $1 AND deleted_at IS NULL \
               AND ($2::text IS NULL OR status = $2) \
             ORDER BY name \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(project_id)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update equipment. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEquipment,
    ) -> Result<Option<Equipment>, sqlx::Error> {
        let query = format!(
            "UPDATE equipment SET
                name = COALESCE($2, name),
                category = COALESCE($3, category),
                location = COALESCE($4, location),
                status = COALESCE($5, status),
                last_service_at = COALESCE($6, last_service_at),
                next_service_at = COALESCE($7, next_service_at),
                notes = COALESCE($8, notes),
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.location)
            .bind(&input.status)
            .bind(input.last_service_at)
            .bind(input.next_service_at)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete equipment. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE equipment SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

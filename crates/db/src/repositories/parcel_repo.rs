//! Repository for the `parcels` table.

use sqlx::PgPool;
use veranda_core::types::DbId;

use crate::models::parcel::{CreateParcel, Parcel};

/// Column list for `parcels` queries.
const COLUMNS: &str = "id, project_id, unit_id, carrier, tracking_number, description, \
     received_at, collected_at, collected_by_name, status, logged_by, created_at";

/// Provides CRUD operations for parcels.
pub struct ParcelRepo;

impl ParcelRepo {
    /// Log a parcel received at the gate, returning the created row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        logged_by: DbId,
        input: &CreateParcel,
    ) -> Result<Parcel, sqlx::Error> {
        let query = format!(
            "INSERT INTO parcels (project_id, unit_id, carrier, tracking_number, description, logged_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Parcel>(&query)
            .bind(project_id)
            .bind(input.unit_id)
            .bind(&input.carrier)
            .bind(&input.tracking_number)
            .bind(&input.description)
            .bind(logged_by)
            .fetch_one(pool)
            .await
    }

    /// Find a parcel by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Parcel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM parcels WHERE id = $1");
        sqlx::query_as::<_, Parcel>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's parcels with an optional status filter, newest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Parcel>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM parcels \
             WHERE project_id = $1 AND ($2::text IS NULL OR status = $2) \
             ORDER BY received_at DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Parcel>(&query)
            .bind(project_id)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List a unit's parcels, newest first.
    pub async fn list_by_unit(pool: &PgPool, unit_id: DbId) -> Result<Vec<Parcel>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM parcels WHERE unit_id = $1 ORDER BY received_at DESC");
        sqlx::query_as::<_, Parcel>(&query)
            .bind(unit_id)
            .fetch_all(pool)
            .await
    }

    /// Mark an awaiting parcel collected.
    ///
    /// Returns `None` if the parcel does not exist or was already collected.
    pub async fn mark_collected(
        pool: &PgPool,
        id: DbId,
        collected_by_name: Option<&str>,
    ) -> Result<Option<Parcel>, sqlx::Error> {
        let query = format!(
            "UPDATE parcels SET status = 'collected', collected_at = NOW(), collected_by_name = $2
             WHERE id = $1 AND status = 'awaiting_collection'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Parcel>(&query)
            .bind(id)
            .bind(collected_by_name)
            .fetch_optional(pool)
            .await
    }
}

//! Repository for the `patrol_checkpoints` and `patrol_logs` tables.

use sqlx::PgPool;
use veranda_core::types::{DbId, Timestamp};

use crate::models::patrol::{CreateCheckpoint, PatrolCheckpoint, PatrolLog, UpdateCheckpoint};

/// Column list for `patrol_checkpoints` queries.
const CHECKPOINT_COLUMNS: &str = "id, project_id, name, location, code, is_active, created_at";

/// Column list for `patrol_logs` queries.
const LOG_COLUMNS: &str = "id, checkpoint_id, guard_id, scanned_at, note";

/// Provides CRUD operations for patrol checkpoints and scan logs.
pub struct PatrolRepo;

impl PatrolRepo {
    /// Create a checkpoint, returning the created row.
    pub async fn create_checkpoint(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateCheckpoint,
    ) -> Result<PatrolCheckpoint, sqlx::Error> {
        let query = format!(
            "INSERT INTO patrol_checkpoints (project_id, name, location, code)
             VALUES ($1, $2, $3, $4)
             RETURNING {CHECKPOINT_COLUMNS}"
        );
        sqlx::query_as::<_, PatrolCheckpoint>(&query)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.location)
            .bind(&input.code)
            .fetch_one(pool)
            .await
    }

    /// List a project's checkpoints.
    pub async fn list_checkpoints(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<PatrolCheckpoint>, sqlx::Error> {
        let query = format!(
            "SELECT {CHECKPOINT_COLUMNS} FROM patrol_checkpoints \
             WHERE project_id = $1 ORDER BY name"
        );
        sqlx::query_as::<_, PatrolCheckpoint>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Find a checkpoint by id.
    pub async fn find_checkpoint(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PatrolCheckpoint>, sqlx::Error> {
        let query = format!("SELECT {CHECKPOINT_COLUMNS} FROM patrol_checkpoints WHERE id = $1");
        sqlx::query_as::<_, PatrolCheckpoint>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active checkpoint by its scan code within a project.
    pub async fn find_active_by_code(
        pool: &PgPool,
        project_id: DbId,
        code: &str,
    ) -> Result<Option<PatrolCheckpoint>, sqlx::Error> {
        let query = format!(
            "SELECT {CHECKPOINT_COLUMNS} FROM patrol_checkpoints \
             WHERE project_id = $1 AND code = $2 AND is_active"
        );
        sqlx::query_as::<_, PatrolCheckpoint>(&query)
            .bind(project_id)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Update a checkpoint. Only non-`None` fields in `input` are applied.
    pub async fn update_checkpoint(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCheckpoint,
    ) -> Result<Option<PatrolCheckpoint>, sqlx::Error> {
        let query = format!(
            "UPDATE patrol_checkpoints SET
                name = COALESCE($2, name),
                location = COALESCE($3, location),
                is_active = COALESCE($4, is_active)
             WHERE id = $1
             RETURNING {CHECKPOINT_COLUMNS}"
        );
        sqlx::query_as::<_, PatrolCheckpoint>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.location)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Record a checkpoint scan, returning the created log row.
    pub async fn insert_log(
        pool: &PgPool,
        checkpoint_id: DbId,
        guard_id: DbId,
        note: Option<&str>,
    ) -> Result<PatrolLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO patrol_logs (checkpoint_id, guard_id, note)
             VALUES ($1, $2, $3)
             RETURNING {LOG_COLUMNS}"
        );
        sqlx::query_as::<_, PatrolLog>(&query)
            .bind(checkpoint_id)
            .bind(guard_id)
            .bind(note)
            .fetch_one(pool)
            .await
    }

    /// List scan logs across a project's checkpoints with optional guard and
    /// time-range filters, newest first.
    pub async fn list_logs(
        pool: &PgPool,
        project_id: DbId,
        guard_id: Option<DbId>,
        from: Option<Timestamp>,
        to: Option<Timestamp>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PatrolLog>, sqlx::Error> {
        let query = format!(
            "SELECT l.{} FROM patrol_logs l \
             JOIN patrol_checkpoints c ON c.id = l.checkpoint_id \
             WHERE c.project_id = $1 \
               AND ($2::bigint IS NULL OR l.guard_id = $2) \
               AND ($3::timestamptz IS NULL OR l.scanned_at >= $3) \
               AND ($4::timestamptz IS NULL OR l.scanned_at <= $4) \
             ORDER BY l.scanned_at DESC \
             LIMIT $5 OFFSET $6",
            LOG_COLUMNS.replace(", ", ", l.")
        );
        sqlx::query_as::<_, PatrolLog>(&query)
            .bind(project_id)
            .bind(guard_id)
            .bind(from)
            .bind(to)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}

//! Repository for the `announcements` table.

use sqlx::PgPool;
use veranda_core::types::DbId;

use crate::models::announcement::{Announcement, CreateAnnouncement, UpdateAnnouncement};

/// Column list for `announcements` queries.
const COLUMNS: &str = "id, project_id, author_id, title, body, category, is_pinned, expires_at, \
     deleted_at, created_at, updated_at";

/// Provides CRUD operations for announcements.
pub struct AnnouncementRepo;

impl AnnouncementRepo {
    /// Insert a new announcement, returning the created row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        author_id: DbId,
        input: &CreateAnnouncement,
    ) -> Result<Announcement, sqlx::Error> {
        let query = format!(
            "INSERT INTO announcements (project_id, author_id, title, body, category, is_pinned, expires_at)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'general'), COALESCE($6, FALSE), $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(project_id)
            .bind(author_id)
            .bind(&input.title)
            .bind(&input.body)
            .bind(&input.category)
            .bind(input.is_pinned)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find an announcement by id. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Announcement>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM announcements WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Announcement>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's current announcements, pinned first then newest.
    ///
    /// Expired announcements (past `expires_at`) are excluded.
    pub async fn list_current(
        pool: &PgPool,
        project_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Announcement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM announcements \
             WHERE project_id = $1 AND deleted_at IS NULL \
               AND (expires_at IS NULL OR expires_at > NOW()) \
             ORDER BY is_pinned DESC, created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(project_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update an announcement. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAnnouncement,
    ) -> Result<Option<Announcement>, sqlx::Error> {
        let query = format!(
            "UPDATE announcements SET
                title = COALESCE($2, title),
                body = COALESCE($3, body),
                category = COALESCE($4, category),
                is_pinned = COALESCE($5, is_pinned),
                expires_at = COALESCE($6, expires_at),
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.body)
            .bind(&input.category)
            .bind(input.is_pinned)
            .bind(input.expires_at)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete an announcement. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE announcements SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

//! Repository for the `attendance` table.

use sqlx::PgPool;
use veranda_core::types::{DbId, Timestamp};

use crate::models::attendance::AttendanceRecord;

/// Column list for `attendance` queries.
const COLUMNS: &str = "id, project_id, user_id, checked_in_at, checked_out_at, note";

/// Provides check-in/check-out operations for staff attendance.
pub struct AttendanceRepo;

impl AttendanceRepo {
    /// Open a shift for a user.
    ///
    /// The partial unique index on open shifts makes a second check-in fail
    /// with a unique violation; callers surface that as a conflict.
    pub async fn check_in(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
        note: Option<&str>,
    ) -> Result<AttendanceRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO attendance (project_id, user_id, note)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(project_id)
            .bind(user_id)
            .bind(note)
            .fetch_one(pool)
            .await
    }

    /// Close the user's open shift.
    ///
    /// Returns `None` if the user has no open shift.
    pub async fn check_out(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<AttendanceRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE attendance SET checked_out_at = NOW()
             WHERE user_id = $1 AND checked_out_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Find the user's open shift, if any.
    pub async fn find_open_shift(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<AttendanceRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendance WHERE user_id = $1 AND checked_out_at IS NULL"
        );
        sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's attendance records within an optional date range,
    /// newest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
        from: Option<Timestamp>,
        to: Option<Timestamp>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendance \
             WHERE project_id = $1 \
               AND ($2::timestamptz IS NULL OR checked_in_at >= $2) \
               AND ($3::timestamptz IS NULL OR checked_in_at <= $3) \
             ORDER BY checked_in_at DESC \
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, AttendanceRecord>(&query)
            .bind(project_id)
            .bind(from)
            .bind(to)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}

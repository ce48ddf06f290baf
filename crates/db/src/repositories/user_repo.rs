//! Repository for the `users` table.

use sqlx::PgPool;
use veranda_core::types::{DbId, Timestamp};

use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list for `users` queries.
const COLUMNS: &str = "id, username, email, phone, password_hash, role_id, project_id, unit_id, \
     is_active, failed_login_count, locked_until, last_login_at, deleted_at, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, phone, password_hash, role_id, project_id, unit_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.password_hash)
            .bind(input.role_id)
            .bind(input.project_id)
            .bind(input.unit_id)
            .fetch_one(pool)
            .await
    }

    /// Find a user by id. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username. Excludes soft-deleted rows.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM users WHERE username = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// List all users, newest first. Excludes soft-deleted rows.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM users WHERE deleted_at IS NULL ORDER BY created_at DESC");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// List users of one project, newest first. Excludes soft-deleted rows.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users \
             WHERE project_id = $1 AND deleted_at IS NULL \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// List active users of a project holding the named role.
    ///
    /// Used for notification fan-out (e.g. all residents, all security staff).
    pub async fn list_active_by_role(
        pool: &PgPool,
        project_id: DbId,
        role_name: &str,
    ) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT u.{} FROM users u \
             JOIN roles r ON r.id = u.role_id \
             WHERE u.project_id = $1 AND r.name = $2 \
               AND u.is_active AND u.deleted_at IS NULL",
            COLUMNS.replace(", ", ", u.")
        );
        sqlx::query_as::<_, User>(&query)
            .bind(project_id)
            .bind(role_name)
            .fetch_all(pool)
            .await
    }

    /// List active residents assigned to a unit.
    pub async fn list_active_by_unit(
        pool: &PgPool,
        unit_id: DbId,
    ) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users \
             WHERE unit_id = $1 AND is_active AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(unit_id)
            .fetch_all(pool)
            .await
    }

    /// Count active users of a project holding the named role.
    pub async fn count_active_by_role(
        pool: &PgPool,
        project_id: DbId,
        role_name: &str,
    ) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users u \
             JOIN roles r ON r.id = u.role_id \
             WHERE u.project_id = $1 AND r.name = $2 \
               AND u.is_active AND u.deleted_at IS NULL",
        )
        .bind(project_id)
        .bind(role_name)
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }

    /// Update a user's profile fields. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                role_id = COALESCE($5, role_id),
                unit_id = COALESCE($6, unit_id),
                is_active = COALESCE($7, is_active),
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.role_id)
            .bind(input.unit_id)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Deactivate a user (blocks login, keeps the row). Returns `true` if a
    /// live active row was deactivated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET is_active = FALSE, updated_at = NOW() \
             WHERE id = $1 AND is_active AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace a user's password hash. Returns `true` if a row was updated.
    pub async fn set_password_hash(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = $2, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Bump the consecutive-failure counter after a bad password.
    pub async fn increment_failed_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET failed_login_count = failed_login_count + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Lock the account until the given time.
    pub async fn lock_account(
        pool: &PgPool,
        id: DbId,
        locked_until: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET locked_until = $2 WHERE id = $1")
            .bind(id)
            .bind(locked_until)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Reset lockout state and stamp `last_login_at` after a good login.
    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET failed_login_count = 0, locked_until = NULL, last_login_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}

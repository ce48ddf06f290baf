//! Repository for the `bills` table.

use sqlx::PgPool;
use veranda_core::types::DbId;

use crate::models::bill::{Bill, CreateBill};

/// Column list for `bills` queries.
const COLUMNS: &str = "id, project_id, unit_id, bill_type, description, amount_cents, due_date, \
     status, paid_at, reference_no, issued_by, created_at, updated_at";

/// Provides CRUD operations for bills.
pub struct BillRepo;

impl BillRepo {
    /// Issue a new bill to a unit, returning the created row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        issued_by: DbId,
        input: &CreateBill,
    ) -> Result<Bill, sqlx::Error> {
        let query = format!(
            "INSERT INTO bills (project_id, unit_id, bill_type, description, amount_cents, due_date, issued_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bill>(&query)
            .bind(project_id)
            .bind(input.unit_id)
            .bind(&input.bill_type)
            .bind(&input.description)
            .bind(input.amount_cents)
            .bind(input.due_date)
            .bind(issued_by)
            .fetch_one(pool)
            .await
    }

    /// Find a bill by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Bill>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bills WHERE id = $1");
        sqlx::query_as::<_, Bill>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's bills with optional unit and status filters,
    /// most recently issued first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
        unit_id: Option<DbId>,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Bill>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bills \
             WHERE project_id = $1 \
               AND ($2::bigint IS NULL OR unit_id = $2) \
               AND ($3::text IS NULL OR status = $3) \
             ORDER BY created_at DESC \
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Bill>(&query)
            .bind(project_id)
            .bind(unit_id)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List a unit's bills, most recently issued first.
    pub async fn list_by_unit(
        pool: &PgPool,
        unit_id: DbId,
        status: Option<&str>,
    ) -> Result<Vec<Bill>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bills \
             WHERE unit_id = $1 AND ($2::text IS NULL OR status = $2) \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Bill>(&query)
            .bind(unit_id)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Record payment of a pending or overdue bill.
    ///
    /// Returns `None` if the bill does not exist or is not payable.
    pub async fn mark_paid(
        pool: &PgPool,
        id: DbId,
        reference_no: Option<&str>,
    ) -> Result<Option<Bill>, sqlx::Error> {
        let query = format!(
            "UPDATE bills SET status = 'paid', paid_at = NOW(), reference_no = $2, updated_at = NOW()
             WHERE id = $1 AND status IN ('pending', 'overdue')
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bill>(&query)
            .bind(id)
            .bind(reference_no)
            .fetch_optional(pool)
            .await
    }

    /// Cancel an unpaid bill. Returns `None` if it is already paid or cancelled.
    pub async fn cancel(pool: &PgPool, id: DbId) -> Result<Option<Bill>, sqlx::Error> {
        let query = format!(
            "UPDATE bills SET status = 'cancelled', updated_at = NOW()
             WHERE id = $1 AND status IN ('pending', 'overdue')
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bill>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Flip past-due pending bills to `overdue`.
    ///
    /// Called by the background sweeper. Returns the number of bills flipped.
    pub async fn mark_overdue(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE bills SET status = 'overdue', updated_at = NOW() \
             WHERE status = 'pending' AND due_date < CURRENT_DATE",
        )
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Count a project's unpaid (pending or overdue) bills.
    pub async fn count_unpaid(pool: &PgPool, project_id: DbId) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM bills WHERE project_id = $1 AND status IN ('pending', 'overdue')",
        )
        .bind(project_id)
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }
}

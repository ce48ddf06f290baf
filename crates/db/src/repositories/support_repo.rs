//! Repository for the `support_tickets` and `support_replies` tables.

use sqlx::PgPool;
use veranda_core::types::DbId;

use crate::models::support::{CreateSupportTicket, SupportReply, SupportTicket};

/// Column list for `support_tickets` queries.
const TICKET_COLUMNS: &str =
    "id, project_id, opened_by, subject, body, status, closed_at, created_at, updated_at";

/// Column list for `support_replies` queries.
const REPLY_COLUMNS: &str = "id, ticket_id, author_id, body, created_at";

/// Provides CRUD operations for support threads.
pub struct SupportRepo;

impl SupportRepo {
    /// Open a new ticket, returning the created row.
    pub async fn create_ticket(
        pool: &PgPool,
        project_id: DbId,
        opened_by: DbId,
        input: &CreateSupportTicket,
    ) -> Result<SupportTicket, sqlx::Error> {
        let query = format!(
            "INSERT INTO support_tickets (project_id, opened_by, subject, body)
             VALUES ($1, $2, $3, $4)
             RETURNING {TICKET_COLUMNS}"
        );
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(project_id)
            .bind(opened_by)
            .bind(&input.subject)
            .bind(&input.body)
            .fetch_one(pool)
            .await
    }

    /// Find a ticket by id.
    pub async fn find_ticket(pool: &PgPool, id: DbId) -> Result<Option<SupportTicket>, sqlx::Error> {
        let query = format!("SELECT {TICKET_COLUMNS} FROM support_tickets WHERE id = $1");
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's tickets with an optional status filter, newest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<SupportTicket>, sqlx::Error> {
        let query = format!(
            "SELECT {TICKET_COLUMNS} FROM support_tickets \
             WHERE project_id = $1 AND ($2::text IS NULL OR status = $2) \
             ORDER BY created_at DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(project_id)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List the tickets a user opened, newest first.
    pub async fn list_by_opener(
        pool: &PgPool,
        opened_by: DbId,
    ) -> Result<Vec<SupportTicket>, sqlx::Error> {
        let query = format!(
            "SELECT {TICKET_COLUMNS} FROM support_tickets \
             WHERE opened_by = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(opened_by)
            .fetch_all(pool)
            .await
    }

    /// Append a reply to a ticket and set its status.
    ///
    /// Admin replies mark the ticket `answered`; resident replies reopen it
    /// to `open`. The caller decides which status applies.
    pub async fn add_reply(
        pool: &PgPool,
        ticket_id: DbId,
        author_id: DbId,
        body: &str,
        new_status: &str,
    ) -> Result<SupportReply, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO support_replies (ticket_id, author_id, body)
             VALUES ($1, $2, $3)
             RETURNING {REPLY_COLUMNS}"
        );
        let reply = sqlx::query_as::<_, SupportReply>(&query)
            .bind(ticket_id)
            .bind(author_id)
            .bind(body)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE support_tickets SET status = $2, updated_at = NOW() \
             WHERE id = $1 AND status <> 'closed'",
        )
        .bind(ticket_id)
        .bind(new_status)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(reply)
    }

    /// List a ticket's replies, oldest first.
    pub async fn list_replies(
        pool: &PgPool,
        ticket_id: DbId,
    ) -> Result<Vec<SupportReply>, sqlx::Error> {
        let query = format!(
            "SELECT {REPLY_COLUMNS} FROM support_replies \
             WHERE ticket_id = $1 ORDER BY created_at"
        );
        sqlx::query_as::<_, SupportReply>(&query)
            .bind(ticket_id)
            .fetch_all(pool)
            .await
    }

    /// Close a ticket. Returns `None` if it does not exist or is closed.
    pub async fn close_ticket(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SupportTicket>, sqlx::Error> {
        let query = format!(
            "UPDATE support_tickets SET status = 'closed', closed_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND status <> 'closed'
             RETURNING {TICKET_COLUMNS}"
        );
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

//! Repository for the `bookings` table.

use sqlx::PgPool;
use veranda_core::types::{DbId, Timestamp};

use crate::models::booking::{ApprovalOutcome, Booking, CreateBooking};

/// Column list for `bookings` queries.
const COLUMNS: &str = "id, facility_id, unit_id, booked_by, starts_at, ends_at, status, \
     decided_by, decided_at, note, created_at, updated_at";

/// Provides CRUD operations for facility bookings.
pub struct BookingRepo;

impl BookingRepo {
    /// Insert a pending booking, returning the created row.
    pub async fn create(
        pool: &PgPool,
        unit_id: DbId,
        booked_by: DbId,
        input: &CreateBooking,
    ) -> Result<Booking, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookings (facility_id, unit_id, booked_by, starts_at, ends_at, note)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(input.facility_id)
            .bind(unit_id)
            .bind(booked_by)
            .bind(input.starts_at)
            .bind(input.ends_at)
            .bind(&input.note)
            .fetch_one(pool)
            .await
    }

    /// Find a booking by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List bookings across a project's facilities with an optional status
    /// filter, soonest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        let query = format!(
            "SELECT b.{} FROM bookings b \
             JOIN facilities f ON f.id = b.facility_id \
             WHERE f.project_id = $1 AND ($2::text IS NULL OR b.status = $2) \
             ORDER BY b.starts_at \
             LIMIT $3 OFFSET $4",
            COLUMNS.replace(", ", ", b.")
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(project_id)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List the bookings a user made, soonest first.
    pub async fn list_by_booker(
        pool: &PgPool,
        booked_by: DbId,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM bookings WHERE booked_by = $1 ORDER BY starts_at");
        sqlx::query_as::<_, Booking>(&query)
            .bind(booked_by)
            .fetch_all(pool)
            .await
    }

    /// Check whether an approved booking overlaps the given window.
    ///
    /// `exclude_id` skips one booking (the one being approved).
    /// Two windows overlap when each starts before the other ends.
    pub async fn has_approved_overlap(
        pool: &PgPool,
        facility_id: DbId,
        starts_at: Timestamp,
        ends_at: Timestamp,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM bookings \
             WHERE facility_id = $1 AND status = 'approved' \
               AND starts_at < $3 AND ends_at > $2 \
               AND ($4::bigint IS NULL OR id <> $4)",
        )
        .bind(facility_id)
        .bind(starts_at)
        .bind(ends_at)
        .bind(exclude_id)
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0) > 0)
    }

    /// Approve a pending booking, re-checking the facility calendar inside
    /// a transaction that locks the facility row. Two concurrent approvals
    /// of overlapping windows serialize on that lock, so only one commits.
    pub async fn approve(
        pool: &PgPool,
        id: DbId,
        decided_by: DbId,
        note: Option<&str>,
    ) -> Result<ApprovalOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "SELECT b.{} FROM bookings b \
             JOIN facilities f ON f.id = b.facility_id \
             WHERE b.id = $1 \
             FOR UPDATE OF f",
            COLUMNS.replace(", ", ", b.")
        );
        let booking = sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let booking = match booking {
            Some(b) if b.status == "pending" => b,
            _ => return Ok(ApprovalOutcome::NotPending),
        };

        let overlapping: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM bookings \
             WHERE facility_id = $1 AND status = 'approved' \
               AND starts_at < $3 AND ends_at > $2 AND id <> $4",
        )
        .bind(booking.facility_id)
        .bind(booking.starts_at)
        .bind(booking.ends_at)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
        if overlapping.unwrap_or(0) > 0 {
            return Ok(ApprovalOutcome::SlotTaken);
        }

        let query = format!(
            "UPDATE bookings SET
                status = 'approved',
                decided_by = $2,
                decided_at = NOW(),
                note = COALESCE($3, note),
                updated_at = NOW()
             WHERE id = $1 AND status = 'pending'
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(decided_by)
            .bind(note)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(ApprovalOutcome::Approved(updated))
    }

    /// Record an admin decision on a pending booking.
    ///
    /// Returns `None` if the booking does not exist or is not pending.
    pub async fn decide(
        pool: &PgPool,
        id: DbId,
        status: &str,
        decided_by: DbId,
        note: Option<&str>,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings SET
                status = $2,
                decided_by = $3,
                decided_at = NOW(),
                note = COALESCE($4, note),
                updated_at = NOW()
             WHERE id = $1 AND status = 'pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(status)
            .bind(decided_by)
            .bind(note)
            .fetch_optional(pool)
            .await
    }

    /// Cancel a pending or approved booking.
    ///
    /// Returns `None` if the booking does not exist or is already settled.
    pub async fn cancel(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings SET status = 'cancelled', updated_at = NOW()
             WHERE id = $1 AND status IN ('pending', 'approved')
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

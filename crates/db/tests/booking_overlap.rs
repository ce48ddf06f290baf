//! Facility booking conflict detection and decision flow.

mod common;

use assert_matches::assert_matches;
use chrono::{Duration, TimeZone, Utc};
use common::{seed_project, seed_unit, seed_user};
use sqlx::PgPool;
use veranda_core::types::{DbId, Timestamp};
use veranda_db::models::booking::{ApprovalOutcome, CreateBooking};
use veranda_db::models::facility::CreateFacility;
use veranda_db::repositories::{BookingRepo, FacilityRepo};

fn at(hour: u32) -> Timestamp {
    Utc.with_ymd_and_hms(2026, 9, 5, hour, 0, 0).unwrap()
}

async fn seed_facility(pool: &PgPool, project_id: DbId) -> DbId {
    FacilityRepo::create(
        pool,
        project_id,
        &CreateFacility {
            name: "Clubhouse".to_string(),
            description: None,
            capacity: Some(40),
            open_time: None,
            close_time: None,
            is_bookable: None,
        },
    )
    .await
    .expect("facility creation should succeed")
    .id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn overlap_only_counts_approved_bookings(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    let unit = seed_unit(&pool, project.id, "A-101").await;
    let resident = seed_user(&pool, Some(project.id), "alex-resident", "resident").await;
    let admin = seed_user(&pool, Some(project.id), "cedar-admin", "admin").await;
    let facility = seed_facility(&pool, project.id).await;

    let booking = BookingRepo::create(
        &pool,
        unit.id,
        resident.id,
        &CreateBooking {
            facility_id: facility,
            starts_at: at(10),
            ends_at: at(12),
            note: None,
        },
    )
    .await
    .expect("booking should succeed");
    assert_eq!(booking.status, "pending");

    // Pending bookings do not block the slot.
    assert!(
        !BookingRepo::has_approved_overlap(&pool, facility, at(10), at(12), None)
            .await
            .expect("overlap check should succeed")
    );

    let approved = BookingRepo::decide(&pool, booking.id, "approved", admin.id, None)
        .await
        .expect("decision should succeed")
        .expect("booking should be pending");
    assert_eq!(approved.status, "approved");
    assert_eq!(approved.decided_by, Some(admin.id));

    // Partial overlap with the approved window.
    assert!(
        BookingRepo::has_approved_overlap(&pool, facility, at(11), at(13), None)
            .await
            .expect("overlap check should succeed")
    );
    // Back-to-back slots share an endpoint but do not overlap.
    assert!(
        !BookingRepo::has_approved_overlap(&pool, facility, at(12), at(14), None)
            .await
            .expect("overlap check should succeed")
    );
    assert!(
        !BookingRepo::has_approved_overlap(&pool, facility, at(8), at(10), None)
            .await
            .expect("overlap check should succeed")
    );
    // The booking itself is skipped when re-checking before approval.
    assert!(
        !BookingRepo::has_approved_overlap(&pool, facility, at(10), at(12), Some(booking.id))
            .await
            .expect("overlap check should succeed")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn decide_only_moves_pending_bookings(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    let unit = seed_unit(&pool, project.id, "A-101").await;
    let resident = seed_user(&pool, Some(project.id), "alex-resident", "resident").await;
    let admin = seed_user(&pool, Some(project.id), "cedar-admin", "admin").await;
    let facility = seed_facility(&pool, project.id).await;

    let booking = BookingRepo::create(
        &pool,
        unit.id,
        resident.id,
        &CreateBooking {
            facility_id: facility,
            starts_at: at(10),
            ends_at: at(10) + Duration::hours(2),
            note: None,
        },
    )
    .await
    .expect("booking should succeed");

    let rejected = BookingRepo::decide(&pool, booking.id, "rejected", admin.id, Some("full"))
        .await
        .expect("decision should succeed")
        .expect("booking should be pending");
    assert_eq!(rejected.status, "rejected");
    assert_eq!(rejected.note.as_deref(), Some("full"));

    // A settled booking cannot be decided again or cancelled.
    assert!(BookingRepo::decide(&pool, booking.id, "approved", admin.id, None)
        .await
        .expect("query should succeed")
        .is_none());
    assert!(BookingRepo::cancel(&pool, booking.id)
        .await
        .expect("query should succeed")
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cancel_releases_an_approved_slot(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    let unit = seed_unit(&pool, project.id, "A-101").await;
    let resident = seed_user(&pool, Some(project.id), "alex-resident", "resident").await;
    let admin = seed_user(&pool, Some(project.id), "cedar-admin", "admin").await;
    let facility = seed_facility(&pool, project.id).await;

    let booking = BookingRepo::create(
        &pool,
        unit.id,
        resident.id,
        &CreateBooking {
            facility_id: facility,
            starts_at: at(10),
            ends_at: at(12),
            note: None,
        },
    )
    .await
    .expect("booking should succeed");
    BookingRepo::decide(&pool, booking.id, "approved", admin.id, None)
        .await
        .expect("decision should succeed");

    let cancelled = BookingRepo::cancel(&pool, booking.id)
        .await
        .expect("cancel should succeed")
        .expect("approved booking should be cancellable");
    assert_eq!(cancelled.status, "cancelled");

    assert!(
        !BookingRepo::has_approved_overlap(&pool, facility, at(10), at(12), None)
            .await
            .expect("overlap check should succeed")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn approval_admits_only_one_of_two_overlapping_requests(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    let unit = seed_unit(&pool, project.id, "A-101").await;
    let resident = seed_user(&pool, Some(project.id), "alex-resident", "resident").await;
    let admin = seed_user(&pool, Some(project.id), "cedar-admin", "admin").await;
    let facility = seed_facility(&pool, project.id).await;

    let first = BookingRepo::create(
        &pool,
        unit.id,
        resident.id,
        &CreateBooking {
            facility_id: facility,
            starts_at: at(10),
            ends_at: at(12),
            note: None,
        },
    )
    .await
    .expect("booking should succeed");
    let second = BookingRepo::create(
        &pool,
        unit.id,
        resident.id,
        &CreateBooking {
            facility_id: facility,
            starts_at: at(11),
            ends_at: at(13),
            note: None,
        },
    )
    .await
    .expect("booking should succeed");

    // Both requests sit in the calendar as pending; only one wins the slot.
    let outcome = BookingRepo::approve(&pool, first.id, admin.id, None)
        .await
        .expect("approval should succeed");
    assert_matches!(outcome, ApprovalOutcome::Approved(ref b) if b.status == "approved");

    let outcome = BookingRepo::approve(&pool, second.id, admin.id, None)
        .await
        .expect("approval should succeed");
    assert_matches!(outcome, ApprovalOutcome::SlotTaken);

    // A settled booking cannot be approved again.
    let outcome = BookingRepo::approve(&pool, first.id, admin.id, None)
        .await
        .expect("approval should succeed");
    assert_matches!(outcome, ApprovalOutcome::NotPending);

    let approved: Option<i64> = sqlx::query_scalar(
        "SELECT COUNT(*) FROM bookings WHERE facility_id = $1 AND status = 'approved'",
    )
    .bind(facility)
    .fetch_one(&pool)
    .await
    .expect("count should succeed");
    assert_eq!(approved.unwrap_or(0), 1);
}

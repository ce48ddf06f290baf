//! CRUD round-trips for the core entities at the repository layer.

mod common;

use common::{seed_project, seed_unit, seed_user};
use sqlx::PgPool;
use veranda_db::models::announcement::{CreateAnnouncement, UpdateAnnouncement};
use veranda_db::models::bill::CreateBill;
use veranda_db::models::equipment::CreateEquipment;
use veranda_db::models::maintenance::CreateMaintenanceRequest;
use veranda_db::models::parcel::CreateParcel;
use veranda_db::models::visitor::CreateVisitor;
use veranda_db::repositories::{
    AnnouncementRepo, BillRepo, EquipmentRepo, MaintenanceRepo, NotificationRepo, ParcelRepo,
    VisitorRepo,
};

#[sqlx::test(migrations = "../../db/migrations")]
async fn announcement_create_update_list(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    let admin = seed_user(&pool, Some(project.id), "cedar-admin", "admin").await;

    let created = AnnouncementRepo::create(
        &pool,
        project.id,
        admin.id,
        &CreateAnnouncement {
            title: "Pool closed".to_string(),
            body: "Annual cleaning, back Monday.".to_string(),
            category: Some("outage".to_string()),
            is_pinned: Some(true),
            expires_at: None,
        },
    )
    .await
    .expect("create should succeed");

    assert_eq!(created.category, "outage");
    assert!(created.is_pinned);

    let updated = AnnouncementRepo::update(
        &pool,
        created.id,
        &UpdateAnnouncement {
            title: Some("Pool reopened".to_string()),
            body: None,
            category: None,
            is_pinned: Some(false),
            expires_at: None,
        },
    )
    .await
    .expect("update should succeed")
    .expect("row should exist");

    assert_eq!(updated.title, "Pool reopened");
    assert!(!updated.is_pinned);
    // Untouched fields survive a partial update.
    assert_eq!(updated.body, "Annual cleaning, back Monday.");

    let listed = AnnouncementRepo::list_current(&pool, project.id, 50, 0)
        .await
        .expect("list should succeed");
    assert_eq!(listed.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn bill_lifecycle_pay_and_cancel(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    let unit = seed_unit(&pool, project.id, "A-101").await;
    let admin = seed_user(&pool, Some(project.id), "cedar-admin", "admin").await;

    let bill = BillRepo::create(
        &pool,
        project.id,
        admin.id,
        &CreateBill {
            unit_id: unit.id,
            bill_type: "dues".to_string(),
            description: Some("August dues".to_string()),
            amount_cents: 150_00,
            due_date: chrono::NaiveDate::from_ymd_opt(2026, 8, 31).unwrap(),
        },
    )
    .await
    .expect("issue should succeed");
    assert_eq!(bill.status, "pending");

    let paid = BillRepo::mark_paid(&pool, bill.id, Some("RCPT-0042"))
        .await
        .expect("pay should succeed")
        .expect("bill should be payable");
    assert_eq!(paid.status, "paid");
    assert!(paid.paid_at.is_some());
    assert_eq!(paid.reference_no.as_deref(), Some("RCPT-0042"));

    // A paid bill cannot be paid again or cancelled.
    assert!(BillRepo::mark_paid(&pool, bill.id, None)
        .await
        .expect("query should succeed")
        .is_none());
    assert!(BillRepo::cancel(&pool, bill.id)
        .await
        .expect("query should succeed")
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn visitor_check_in_requires_expected_status(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    let unit = seed_unit(&pool, project.id, "A-101").await;
    let guard = seed_user(&pool, Some(project.id), "gate-guard", "security").await;

    let visitor = VisitorRepo::create(
        &pool,
        project.id,
        guard.id,
        &CreateVisitor {
            unit_id: unit.id,
            name: "Dana Courier".to_string(),
            id_number: None,
            vehicle_plate: Some("XYZ-123".to_string()),
            purpose: Some("delivery".to_string()),
            expected_at: None,
        },
    )
    .await
    .expect("register should succeed");
    assert_eq!(visitor.status, "expected");

    // Check-out before check-in is rejected by the status guard.
    assert!(VisitorRepo::check_out(&pool, visitor.id)
        .await
        .expect("query should succeed")
        .is_none());

    let checked_in = VisitorRepo::check_in(&pool, visitor.id)
        .await
        .expect("check-in should succeed")
        .expect("visitor should be expected");
    assert_eq!(checked_in.status, "checked_in");

    let checked_out = VisitorRepo::check_out(&pool, visitor.id)
        .await
        .expect("check-out should succeed")
        .expect("visitor should be checked in");
    assert_eq!(checked_out.status, "checked_out");
    assert!(checked_out.checked_out_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn parcel_collection_is_one_shot(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    let unit = seed_unit(&pool, project.id, "A-101").await;
    let guard = seed_user(&pool, Some(project.id), "gate-guard", "security").await;

    let parcel = ParcelRepo::create(
        &pool,
        project.id,
        guard.id,
        &CreateParcel {
            unit_id: unit.id,
            carrier: Some("FastShip".to_string()),
            tracking_number: Some("FS123456".to_string()),
            description: None,
        },
    )
    .await
    .expect("log should succeed");
    assert_eq!(parcel.status, "awaiting_collection");

    let collected = ParcelRepo::mark_collected(&pool, parcel.id, Some("Alex Resident"))
        .await
        .expect("collect should succeed")
        .expect("parcel should be awaiting collection");
    assert_eq!(collected.status, "collected");

    // Second collection attempt finds nothing to update.
    assert!(ParcelRepo::mark_collected(&pool, parcel.id, None)
        .await
        .expect("query should succeed")
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn maintenance_assignment_and_resolution_stamp(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    let resident = seed_user(&pool, Some(project.id), "alex-resident", "resident").await;
    let tech = seed_user(&pool, Some(project.id), "pat-tech", "maintenance").await;

    let ticket = MaintenanceRepo::create(
        &pool,
        project.id,
        resident.id,
        &CreateMaintenanceRequest {
            unit_id: None,
            category: "plumbing".to_string(),
            title: "Leaking pipe".to_string(),
            description: "Under the kitchen sink.".to_string(),
            priority: None,
        },
    )
    .await
    .expect("open should succeed");
    assert_eq!(ticket.status, "open");
    assert_eq!(ticket.priority, "medium");

    let assigned = MaintenanceRepo::assign(&pool, ticket.id, tech.id)
        .await
        .expect("assign should succeed")
        .expect("ticket should exist");
    assert_eq!(assigned.assigned_to, Some(tech.id));

    MaintenanceRepo::set_status(&pool, ticket.id, "open", "in_progress")
        .await
        .expect("status update should succeed");
    let resolved = MaintenanceRepo::set_status(&pool, ticket.id, "in_progress", "resolved")
        .await
        .expect("status update should succeed")
        .expect("ticket should exist");
    assert!(resolved.resolved_at.is_some());

    // A transition based on a stale read does not land.
    assert!(
        MaintenanceRepo::set_status(&pool, ticket.id, "in_progress", "cancelled")
            .await
            .expect("query should succeed")
            .is_none()
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn notification_fan_out_and_read_tracking(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    let a = seed_user(&pool, Some(project.id), "resident-a", "resident").await;
    let b = seed_user(&pool, Some(project.id), "resident-b", "resident").await;

    let inserted =
        NotificationRepo::create_many(&pool, &[a.id, b.id], "announcement", "Hello", "World")
            .await
            .expect("fan-out should succeed");
    assert_eq!(inserted, 2);

    assert_eq!(
        NotificationRepo::unread_count(&pool, a.id)
            .await
            .expect("count should succeed"),
        1
    );

    let listed = NotificationRepo::list_for_user(&pool, a.id, true, 50, 0)
        .await
        .expect("list should succeed");
    assert_eq!(listed.len(), 1);

    // Marking a's notification with b's id must not succeed.
    assert!(!NotificationRepo::mark_read(&pool, listed[0].id, b.id)
        .await
        .expect("query should succeed"));
    assert!(NotificationRepo::mark_read(&pool, listed[0].id, a.id)
        .await
        .expect("mark should succeed"));

    assert_eq!(
        NotificationRepo::unread_count(&pool, a.id)
            .await
            .expect("count should succeed"),
        0
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn equipment_listing_filters_and_pages(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;

    for name in ["Boiler", "Elevator A", "Elevator B"] {
        EquipmentRepo::create(
            &pool,
            project.id,
            &CreateEquipment {
                name: name.to_string(),
                category: None,
                location: None,
                next_service_at: None,
                notes: None,
            },
        )
        .await
        .expect("register should succeed");
    }

    let all = EquipmentRepo::list_by_project(&pool, project.id, None, 50, 0)
        .await
        .expect("list should succeed");
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].name, "Boiler");

    let page = EquipmentRepo::list_by_project(&pool, project.id, None, 2, 2)
        .await
        .expect("list should succeed");
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].name, "Elevator B");

    let retired = EquipmentRepo::list_by_project(&pool, project.id, Some("retired"), 50, 0)
        .await
        .expect("list should succeed");
    assert!(retired.is_empty());
}

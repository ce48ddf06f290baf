//! Soft deletion semantics: deleted rows disappear from reads but stay on disk.

mod common;

use common::{seed_project, seed_unit, seed_user};
use sqlx::PgPool;
use veranda_db::models::announcement::CreateAnnouncement;
use veranda_db::models::unit::CreateUnit;
use veranda_db::repositories::{AnnouncementRepo, ProjectRepo, UnitRepo, UserRepo};

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleted_project_is_hidden_from_reads(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;

    assert!(ProjectRepo::soft_delete(&pool, project.id)
        .await
        .expect("delete should succeed"));
    assert!(ProjectRepo::find_by_id(&pool, project.id)
        .await
        .expect("query should succeed")
        .is_none());
    assert!(ProjectRepo::list(&pool)
        .await
        .expect("list should succeed")
        .is_empty());

    // A second delete finds nothing to touch.
    assert!(!ProjectRepo::soft_delete(&pool, project.id)
        .await
        .expect("delete should succeed"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleted_unit_number_can_be_reused(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    let unit = seed_unit(&pool, project.id, "A-101").await;

    assert!(UnitRepo::soft_delete(&pool, unit.id)
        .await
        .expect("delete should succeed"));
    assert!(UnitRepo::find_by_id(&pool, unit.id)
        .await
        .expect("query should succeed")
        .is_none());

    // The unique index on (project_id, unit_number) only covers live rows.
    let replacement = UnitRepo::create(
        &pool,
        project.id,
        &CreateUnit {
            unit_number: "A-101".to_string(),
            block: Some("A".to_string()),
            floor: Some(1),
            occupancy_status: None,
        },
    )
    .await
    .expect("reusing the number should succeed");
    assert_ne!(replacement.id, unit.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleted_announcement_leaves_list(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    let admin = seed_user(&pool, Some(project.id), "cedar-admin", "admin").await;

    let announcement = AnnouncementRepo::create(
        &pool,
        project.id,
        admin.id,
        &CreateAnnouncement {
            title: "Water outage".to_string(),
            body: "Tomorrow 9-11.".to_string(),
            category: None,
            is_pinned: None,
            expires_at: None,
        },
    )
    .await
    .expect("create should succeed");

    assert!(AnnouncementRepo::soft_delete(&pool, announcement.id)
        .await
        .expect("delete should succeed"));
    assert!(AnnouncementRepo::find_by_id(&pool, announcement.id)
        .await
        .expect("query should succeed")
        .is_none());
    assert!(AnnouncementRepo::list_current(&pool, project.id, 50, 0)
        .await
        .expect("list should succeed")
        .is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivation_keeps_the_row_but_flips_the_flag(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    let user = seed_user(&pool, Some(project.id), "alex-resident", "resident").await;
    assert!(user.is_active);

    assert!(UserRepo::deactivate(&pool, user.id)
        .await
        .expect("deactivate should succeed"));
    // Deactivating an already-inactive user is a no-op.
    assert!(!UserRepo::deactivate(&pool, user.id)
        .await
        .expect("deactivate should succeed"));

    let found = UserRepo::find_by_username(&pool, "alex-resident")
        .await
        .expect("query should succeed")
        .expect("row should remain");
    assert!(!found.is_active);
}

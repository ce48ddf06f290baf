//! Staff attendance: one open shift per user, enforced by the database.

mod common;

use common::{seed_project, seed_user};
use sqlx::PgPool;
use veranda_db::repositories::AttendanceRepo;

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_check_in_is_a_unique_violation(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    let guard = seed_user(&pool, Some(project.id), "gate-guard", "security").await;

    let shift = AttendanceRepo::check_in(&pool, project.id, guard.id, Some("morning gate"))
        .await
        .expect("check-in should succeed");
    assert!(shift.checked_out_at.is_none());

    let err = AttendanceRepo::check_in(&pool, project.id, guard.id, None)
        .await
        .expect_err("double check-in should fail");
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
        }
        other => panic!("expected a unique violation, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn check_out_closes_the_open_shift(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    let guard = seed_user(&pool, Some(project.id), "gate-guard", "security").await;

    // No shift open yet.
    assert!(AttendanceRepo::check_out(&pool, guard.id)
        .await
        .expect("query should succeed")
        .is_none());

    AttendanceRepo::check_in(&pool, project.id, guard.id, None)
        .await
        .expect("check-in should succeed");
    assert!(AttendanceRepo::find_open_shift(&pool, guard.id)
        .await
        .expect("query should succeed")
        .is_some());

    let closed = AttendanceRepo::check_out(&pool, guard.id)
        .await
        .expect("check-out should succeed")
        .expect("open shift should exist");
    assert!(closed.checked_out_at.is_some());
    assert!(AttendanceRepo::find_open_shift(&pool, guard.id)
        .await
        .expect("query should succeed")
        .is_none());

    // A new shift can open once the previous one is closed.
    AttendanceRepo::check_in(&pool, project.id, guard.id, None)
        .await
        .expect("re-check-in should succeed");

    let records = AttendanceRepo::list_by_project(&pool, project.id, None, None, 50, 0)
        .await
        .expect("list should succeed");
    assert_eq!(records.len(), 2);
}

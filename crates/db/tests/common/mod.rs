//! Shared fixtures for repository integration tests.

use sqlx::PgPool;
use veranda_db::models::project::CreateProject;
use veranda_db::models::unit::CreateUnit;
use veranda_db::models::user::{CreateUser, User};
use veranda_db::repositories::{ProjectRepo, RoleRepo, UnitRepo, UserRepo};

/// Create a project with the given name.
pub async fn seed_project(pool: &PgPool, name: &str) -> veranda_db::models::project::Project {
    ProjectRepo::create(
        pool,
        &CreateProject {
            name: name.to_string(),
            address: Some("1 Test Lane".to_string()),
            description: None,
        },
    )
    .await
    .expect("project creation should succeed")
}

/// Create a unit within a project.
pub async fn seed_unit(pool: &PgPool, project_id: i64, number: &str) -> veranda_db::models::unit::Unit {
    UnitRepo::create(
        pool,
        project_id,
        &CreateUnit {
            unit_number: number.to_string(),
            block: Some("A".to_string()),
            floor: Some(1),
            occupancy_status: None,
        },
    )
    .await
    .expect("unit creation should succeed")
}

/// Create a user with the given role name, scoped to a project.
pub async fn seed_user(pool: &PgPool, project_id: Option<i64>, username: &str, role: &str) -> User {
    let role_row = RoleRepo::find_by_name(pool, role)
        .await
        .expect("role lookup should succeed")
        .expect("seeded role should exist");

    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.test"),
            phone: None,
            password_hash: "$argon2id$fake-hash-for-tests".to_string(),
            role_id: role_row.id,
            project_id,
            unit_id: None,
        },
    )
    .await
    .expect("user creation should succeed")
}

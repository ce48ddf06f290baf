//! HTTP-level tests for role and project-scope enforcement.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, get, get_auth, post_json_auth, seed_project, seed_unit, seed_user,
    token_for,
};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_token_is_unauthorized(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/api/v1/announcements").await;
    common::assert_error_body(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn garbage_token_is_unauthorized(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get_auth(app, "/api/v1/announcements", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn resident_cannot_publish_announcements(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    let resident = seed_user(&pool, Some(project.id), None, "res", "resident").await;
    let app = build_test_app(pool);

    let token = token_for(resident.id, "resident", Some(project.id));
    let body = serde_json::json!({ "title": "Hi", "body": "Not allowed" });
    let response = post_json_auth(app, "/api/v1/announcements", body, &token).await;
    common::assert_error_body(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn maintenance_staff_cannot_work_the_gate(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    let unit = seed_unit(&pool, project.id, "A-01").await;
    let tech = seed_user(&pool, Some(project.id), None, "tech", "maintenance").await;
    let app = build_test_app(pool);

    let token = token_for(tech.id, "maintenance", Some(project.id));
    let body = serde_json::json!({ "unit_id": unit.id, "name": "Courier" });
    let response = post_json_auth(app, "/api/v1/parcels", body, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_is_confined_to_their_project(pool: PgPool) {
    let home = seed_project(&pool, "Cedar Court").await;
    let other = seed_project(&pool, "Birch Row").await;
    let foreign_unit = seed_unit(&pool, other.id, "B-02").await;
    let admin = seed_user(&pool, Some(home.id), None, "admin1", "admin").await;

    let token = token_for(admin.id, "admin", Some(home.id));
    let response = get_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/units/{}", foreign_unit.id),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Naming another project explicitly is rejected outright.
    let response = get_auth(
        build_test_app(pool),
        &format!("/api/v1/units?project_id={}", other.id),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn super_admin_must_name_a_project(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    seed_unit(&pool, project.id, "A-01").await;
    let root = seed_user(&pool, None, None, "root", "super_admin").await;

    let token = token_for(root.id, "super_admin", None);

    // Without ?project_id the request cannot be scoped.
    let response = get_auth(build_test_app(pool.clone()), "/api/v1/units", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // With it, any project is reachable.
    let response = get_auth(
        build_test_app(pool),
        &format!("/api/v1/units?project_id={}", project.id),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().expect("array").len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn project_admin_cannot_create_super_admins(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    let admin = seed_user(&pool, Some(project.id), None, "admin1", "admin").await;
    let app = build_test_app(pool);

    let token = token_for(admin.id, "admin", Some(project.id));
    let body = serde_json::json!({
        "username": "sneaky",
        "email": "sneaky@example.test",
        "password": "long-enough-password",
        "role": "super_admin",
    });
    let response = post_json_auth(app, "/api/v1/users", body, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn project_admin_cannot_create_admins(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    let admin = seed_user(&pool, Some(project.id), None, "admin1", "admin").await;
    let app = build_test_app(pool);

    let token = token_for(admin.id, "admin", Some(project.id));
    let body = serde_json::json!({
        "username": "peer",
        "email": "peer@example.test",
        "password": "long-enough-password",
        "role": "admin",
    });
    let response = post_json_auth(app, "/api/v1/users", body, &token).await;
    common::assert_error_body(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn project_admin_cannot_promote_to_admin(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    let admin = seed_user(&pool, Some(project.id), None, "admin1", "admin").await;
    let resident = seed_user(&pool, Some(project.id), None, "res", "resident").await;
    let app = build_test_app(pool);

    let token = token_for(admin.id, "admin", Some(project.id));
    let body = serde_json::json!({ "role": "admin" });
    let response = common::patch_json_auth(
        app,
        &format!("/api/v1/users/{}", resident.id),
        body,
        &token,
    )
    .await;
    common::assert_error_body(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn super_admin_mints_admins_and_super_admins(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    let root = seed_user(&pool, None, None, "root", "super_admin").await;
    let token = token_for(root.id, "super_admin", None);

    // Project admins land in the named project.
    let body = serde_json::json!({
        "username": "new-admin",
        "email": "new-admin@example.test",
        "password": "long-enough-password",
        "role": "admin",
    });
    let response = post_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/users?project_id={}", project.id),
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["role"], "admin");
    assert_eq!(json["data"]["project_id"], serde_json::json!(project.id));

    // Super admin accounts carry no project and need no ?project_id.
    let body = serde_json::json!({
        "username": "second-root",
        "email": "second-root@example.test",
        "password": "long-enough-password",
        "role": "super_admin",
    });
    let response = post_json_auth(build_test_app(pool), "/api/v1/users", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["role"], "super_admin");
    assert!(json["data"]["project_id"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn audit_export_is_super_admin_only(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    let admin = seed_user(&pool, Some(project.id), None, "admin1", "admin").await;
    let app = build_test_app(pool);

    let token = token_for(admin.id, "admin", Some(project.id));
    let response = get_auth(
        app,
        "/api/v1/audit-logs/export?from=2026-01-01T00:00:00Z&to=2026-02-01T00:00:00Z",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

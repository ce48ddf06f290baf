//! Tests for the error envelope and a few cross-cutting failure paths.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, get, get_auth, post_json_auth, seed_project, seed_unit, seed_user,
    token_for,
};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reports_ok_with_a_live_database(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert!(json["version"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_route_is_404(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/api/v1/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_entity_returns_the_error_envelope(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    let admin = seed_user(&pool, Some(project.id), None, "admin1", "admin").await;
    let app = build_test_app(pool);

    let token = token_for(admin.id, "admin", Some(project.id));
    let response = get_auth(app, "/api/v1/units/999999", &token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "NOT_FOUND");
    assert!(json["error"].as_str().expect("message").contains("999999"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_unit_number_maps_to_conflict(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    seed_unit(&pool, project.id, "A-01").await;
    let admin = seed_user(&pool, Some(project.id), None, "admin1", "admin").await;
    let app = build_test_app(pool);

    let token = token_for(admin.id, "admin", Some(project.id));
    let body = serde_json::json!({ "unit_number": "A-01" });
    let response = post_json_auth(app, "/api/v1/units", body, &token).await;

    common::assert_error_body(response, StatusCode::CONFLICT, "CONFLICT").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn validation_failures_are_bad_requests(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    let unit = seed_unit(&pool, project.id, "A-01").await;
    let admin = seed_user(&pool, Some(project.id), None, "admin1", "admin").await;
    let app = build_test_app(pool);

    // A bill for zero cents is refused before it reaches the database.
    let token = token_for(admin.id, "admin", Some(project.id));
    let body = serde_json::json!({
        "unit_id": unit.id,
        "bill_type": "maintenance_fee",
        "amount_cents": 0,
        "due_date": "2026-09-30",
    });
    let response = post_json_auth(app, "/api/v1/bills", body, &token).await;
    common::assert_error_body(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn response_carries_a_request_id(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/health").await;
    assert!(response.headers().contains_key("x-request-id"));
}

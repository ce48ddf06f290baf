//! HTTP-level integration tests for the auth endpoints.
//!
//! Covers login, the lockout counter, refresh token rotation, and logout.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, post_json, post_json_auth, seed_project, seed_user, TEST_PASSWORD,
};
use sqlx::PgPool;

async fn login(app: axum::Router, username: &str, password: &str) -> serde_json::Value {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_returns_tokens_and_user_info(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    let user = seed_user(&pool, Some(project.id), None, "alice", "admin").await;
    let app = build_test_app(pool);

    let json = login(app, "alice", TEST_PASSWORD).await;

    assert_eq!(json["success"], true);
    let data = &json["data"];
    assert!(data["access_token"].is_string());
    assert!(data["refresh_token"].is_string());
    assert!(data["expires_in"].is_number());
    assert_eq!(data["user"]["id"], user.id);
    assert_eq!(data["user"]["username"], "alice");
    assert_eq!(data["user"]["role"], "admin");
    assert_eq!(data["user"]["project_id"], project.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_rejects_wrong_password(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    seed_user(&pool, Some(project.id), None, "bob", "resident").await;
    let app = build_test_app(pool);

    let body = serde_json::json!({ "username": "bob", "password": "not-the-password" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    common::assert_error_body(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_rejects_unknown_user(pool: PgPool) {
    let app = build_test_app(pool);

    let body = serde_json::json!({ "username": "ghost", "password": "whatever-here" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn five_failures_lock_the_account(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    seed_user(&pool, Some(project.id), None, "carol", "resident").await;

    for _ in 0..5 {
        let app = build_test_app(pool.clone());
        let body = serde_json::json!({ "username": "carol", "password": "wrong-every-time" });
        let response = post_json(app, "/api/v1/auth/login", body).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // Even the correct password is refused while the lock is in force.
    let app = build_test_app(pool);
    let body = serde_json::json!({ "username": "carol", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivated_account_cannot_log_in(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    let user = seed_user(&pool, Some(project.id), None, "dave", "resident").await;
    veranda_db::repositories::UserRepo::deactivate(&pool, user.id)
        .await
        .expect("deactivate should succeed");
    let app = build_test_app(pool);

    let body = serde_json::json!({ "username": "dave", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_rotates_the_token(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    seed_user(&pool, Some(project.id), None, "erin", "resident").await;

    let json = login(build_test_app(pool.clone()), "erin", TEST_PASSWORD).await;
    let old_refresh = json["data"]["refresh_token"]
        .as_str()
        .expect("refresh token")
        .to_string();

    // First exchange succeeds and returns a different refresh token.
    let body = serde_json::json!({ "refresh_token": old_refresh });
    let response = post_json(build_test_app(pool.clone()), "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let rotated = body_json(response).await;
    assert_ne!(rotated["data"]["refresh_token"], old_refresh);

    // The old token was revoked by the rotation.
    let body = serde_json::json!({ "refresh_token": old_refresh });
    let response = post_json(build_test_app(pool), "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_revokes_refresh_tokens(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    seed_user(&pool, Some(project.id), None, "frank", "resident").await;

    let json = login(build_test_app(pool.clone()), "frank", TEST_PASSWORD).await;
    let access = json["data"]["access_token"].as_str().expect("access token");
    let refresh = json["data"]["refresh_token"]
        .as_str()
        .expect("refresh token")
        .to_string();

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/auth/logout",
        serde_json::json!({}),
        access,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body = serde_json::json!({ "refresh_token": refresh });
    let response = post_json(build_test_app(pool), "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

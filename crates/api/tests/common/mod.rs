//! Shared fixtures for HTTP-level integration tests.
//!
//! `build_test_app` mirrors the router construction in `main.rs` via
//! [`veranda_api::router::build_app_router`], so tests exercise the same
//! middleware stack production uses.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use veranda_api::auth::jwt::{generate_access_token, JwtConfig};
use veranda_api::auth::password::hash_password;
use veranda_api::config::ServerConfig;
use veranda_api::state::AppState;
use veranda_core::types::DbId;
use veranda_db::models::project::CreateProject;
use veranda_db::models::unit::CreateUnit;
use veranda_db::models::user::{CreateUser, User};
use veranda_db::repositories::{ProjectRepo, RoleRepo, UnitRepo, UserRepo};
use veranda_notify::Notifier;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. No SMTP relay is configured, so notifications stay
/// in-app.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let notifier = Arc::new(Notifier::new(pool.clone(), None));
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        notifier,
    };
    veranda_api::router::build_app_router(state, &config)
}

/// Mint a bearer token for a user without going through `/auth/login`.
pub fn token_for(user_id: DbId, role: &str, project_id: Option<DbId>) -> String {
    generate_access_token(user_id, role, project_id, &test_config().jwt)
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Database fixtures
// ---------------------------------------------------------------------------

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
pub async fn seed_unit(
    pool: &PgPool,
    project_id: DbId,
    number: &str,
) -> veranda_db::models::unit::Unit {
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

/// Test password used by every seeded account.
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Create a user with a real Argon2 hash so `/auth/login` works against it.
pub async fn seed_user(
    pool: &PgPool,
    project_id: Option<DbId>,
    unit_id: Option<DbId>,
    username: &str,
    role: &str,
) -> User {
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
            password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
            role_id: role_row.id,
            project_id,
            unit_id,
        },
    )
    .await
    .expect("user creation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request.
pub async fn get(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(path)
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should complete")
}

/// Send a GET request with a bearer token.
pub async fn get_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(path)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should complete")
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, path: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should complete")
}

/// Send a POST request with a JSON body and a bearer token.
pub async fn post_json_auth(
    app: Router,
    path: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should complete")
}

/// Send a POST request with no body and a bearer token.
pub async fn post_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should complete")
}

/// Send a PATCH request with a JSON body and a bearer token.
pub async fn patch_json_auth(
    app: Router,
    path: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method("PATCH")
        .uri(path)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should complete")
}

/// Send a DELETE request with a bearer token.
pub async fn delete_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(path)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should complete")
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Assert an error envelope: `success == false` and the expected code.
pub async fn assert_error_body(response: Response<Body>, status: StatusCode, code: &str) {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], code);
    assert!(json["error"].is_string());
}

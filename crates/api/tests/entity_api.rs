//! HTTP-level flow tests: billing, visitors, bookings, and the
//! notifications each flow produces.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, get_auth, post_auth, post_json_auth, seed_project, seed_unit,
    seed_user, token_for,
};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn bill_is_issued_paid_and_refuses_a_second_payment(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    let unit = seed_unit(&pool, project.id, "A-01").await;
    let admin = seed_user(&pool, Some(project.id), None, "admin1", "admin").await;
    let resident = seed_user(&pool, Some(project.id), Some(unit.id), "res1", "resident").await;

    let admin_token = token_for(admin.id, "admin", Some(project.id));
    let body = serde_json::json!({
        "unit_id": unit.id,
        "bill_type": "maintenance_fee",
        "amount_cents": 125_00,
        "due_date": "2026-09-30",
    });
    let response =
        post_json_auth(build_test_app(pool.clone()), "/api/v1/bills", body, &admin_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let bill = body_json(response).await;
    let bill_id = bill["data"]["id"].as_i64().expect("bill id");
    assert_eq!(bill["data"]["status"], "pending");

    // Issuing the bill notified the unit's resident.
    let resident_token = token_for(resident.id, "resident", Some(project.id));
    let response = get_auth(
        build_test_app(pool.clone()),
        "/api/v1/notifications/unread-count",
        &resident_token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["unread"], 1);

    // The resident records a payment.
    let response = post_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/bills/{bill_id}/pay"),
        serde_json::json!({ "reference_no": "RCPT-77" }),
        &resident_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let paid = body_json(response).await;
    assert_eq!(paid["data"]["status"], "paid");
    assert_eq!(paid["data"]["reference_no"], "RCPT-77");

    // A second payment is a conflict.
    let response = post_json_auth(
        build_test_app(pool),
        &format!("/api/v1/bills/{bill_id}/pay"),
        serde_json::json!({}),
        &resident_token,
    )
    .await;
    common::assert_error_body(response, StatusCode::CONFLICT, "CONFLICT").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn visitor_moves_through_the_gate_in_order(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    let unit = seed_unit(&pool, project.id, "A-01").await;
    let resident = seed_user(&pool, Some(project.id), Some(unit.id), "res1", "resident").await;
    let guard = seed_user(&pool, Some(project.id), None, "guard1", "security").await;

    let resident_token = token_for(resident.id, "resident", Some(project.id));
    let body = serde_json::json!({ "unit_id": unit.id, "name": "Uncle Vern" });
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/visitors",
        body,
        &resident_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let visitor = body_json(response).await;
    let visitor_id = visitor["data"]["id"].as_i64().expect("visitor id");

    let guard_token = token_for(guard.id, "security", Some(project.id));

    // Check-out before check-in is rejected.
    let response = post_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/visitors/{visitor_id}/check-out"),
        &guard_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = post_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/visitors/{visitor_id}/check-in"),
        &guard_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_auth(
        build_test_app(pool),
        &format!("/api/v1/visitors/{visitor_id}/check-out"),
        &guard_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "checked_out");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn booking_approval_respects_the_facility_calendar(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    let unit = seed_unit(&pool, project.id, "A-01").await;
    let admin = seed_user(&pool, Some(project.id), None, "admin1", "admin").await;
    let resident = seed_user(&pool, Some(project.id), Some(unit.id), "res1", "resident").await;

    let admin_token = token_for(admin.id, "admin", Some(project.id));
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/facilities",
        serde_json::json!({ "name": "BBQ Pit", "is_bookable": true }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let facility_id = body_json(response).await["data"]["id"]
        .as_i64()
        .expect("facility id");

    let resident_token = token_for(resident.id, "resident", Some(project.id));
    let mut booking_ids = Vec::new();
    for _ in 0..2 {
        let body = serde_json::json!({
            "facility_id": facility_id,
            "starts_at": "2026-09-05T10:00:00Z",
            "ends_at": "2026-09-05T12:00:00Z",
        });
        let response = post_json_auth(
            build_test_app(pool.clone()),
            "/api/v1/bookings",
            body,
            &resident_token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        booking_ids.push(body_json(response).await["data"]["id"].as_i64().expect("id"));
    }

    // First approval wins the slot.
    let response = post_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/bookings/{}/decide", booking_ids[0]),
        serde_json::json!({ "decision": "approved" }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Approving the overlapping request conflicts.
    let response = post_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/bookings/{}/decide", booking_ids[1]),
        serde_json::json!({ "decision": "approved" }),
        &admin_token,
    )
    .await;
    common::assert_error_body(response, StatusCode::CONFLICT, "CONFLICT").await;

    // Rejecting it is still fine, and the booker hears about it.
    let response = post_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/bookings/{}/decide", booking_ids[1]),
        serde_json::json!({ "decision": "rejected" }),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(
        build_test_app(pool),
        "/api/v1/notifications?unread_only=true",
        &resident_token,
    )
    .await;
    let json = body_json(response).await;
    let titles: Vec<_> = json["data"]
        .as_array()
        .expect("array")
        .iter()
        .map(|n| n["title"].as_str().unwrap_or_default().to_string())
        .collect();
    assert!(titles.iter().any(|t| t == "Booking decision"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unbookable_facility_takes_no_requests(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    let unit = seed_unit(&pool, project.id, "A-01").await;
    let admin = seed_user(&pool, Some(project.id), None, "admin1", "admin").await;
    let resident = seed_user(&pool, Some(project.id), Some(unit.id), "res1", "resident").await;

    let admin_token = token_for(admin.id, "admin", Some(project.id));
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/facilities",
        serde_json::json!({ "name": "Plant Room", "is_bookable": false }),
        &admin_token,
    )
    .await;
    let facility_id = body_json(response).await["data"]["id"]
        .as_i64()
        .expect("facility id");

    let resident_token = token_for(resident.id, "resident", Some(project.id));
    let body = serde_json::json!({
        "facility_id": facility_id,
        "starts_at": "2026-09-05T10:00:00Z",
        "ends_at": "2026-09-05T11:00:00Z",
    });
    let response = post_json_auth(build_test_app(pool), "/api/v1/bookings", body, &resident_token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sos_alert_reaches_security_and_is_worked_to_resolution(pool: PgPool) {
    let project = seed_project(&pool, "Cedar Court").await;
    let unit = seed_unit(&pool, project.id, "A-01").await;
    let resident = seed_user(&pool, Some(project.id), Some(unit.id), "res1", "resident").await;
    let guard = seed_user(&pool, Some(project.id), None, "guard1", "security").await;

    let resident_token = token_for(resident.id, "resident", Some(project.id));
    let body = serde_json::json!({ "alert_type": "medical", "message": "Help on floor 3" });
    let response = post_json_auth(build_test_app(pool.clone()), "/api/v1/sos", body, &resident_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let alert_id = body_json(response).await["data"]["id"].as_i64().expect("id");

    // The guard was notified.
    let guard_token = token_for(guard.id, "security", Some(project.id));
    let response = get_auth(
        build_test_app(pool.clone()),
        "/api/v1/notifications/unread-count",
        &guard_token,
    )
    .await;
    assert_eq!(body_json(response).await["data"]["unread"], 1);

    let response = post_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/sos/{alert_id}/acknowledge"),
        &guard_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Acknowledging twice conflicts, resolving still works.
    let response = post_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/sos/{alert_id}/acknowledge"),
        &guard_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = post_auth(
        build_test_app(pool),
        &format!("/api/v1/sos/{alert_id}/resolve"),
        &guard_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "resolved");
}

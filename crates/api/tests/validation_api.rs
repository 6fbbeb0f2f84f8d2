//! Integration tests for request validation on the RPC endpoints.
//!
//! Every request here is rejected before the handler touches the
//! database, so the tests run against the lazy (unreachable) pool.

mod common;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use common::{body_json, post_json};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: POST /points/award rejects an unknown action type
// ---------------------------------------------------------------------------

#[tokio::test]
async fn award_rejects_unknown_action_type() {
    let app = common::build_test_app(common::lazy_pool());

    let response = post_json(
        app,
        "/api/v1/points/award",
        json!({
            "user_id": "5f0b6b9e-8c4f-4f4e-9f57-0d8f4f4e9f57",
            "points": 50,
            "action_type": "points_for_nothing"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_matches!(body["error"].as_str(), Some(msg) if msg.contains("points_for_nothing"));
}

// ---------------------------------------------------------------------------
// Test: POST /points/award rejects out-of-range amounts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn award_rejects_out_of_range_points() {
    let app = common::build_test_app(common::lazy_pool());

    let response = post_json(
        app,
        "/api/v1/points/award",
        json!({
            "user_id": "5f0b6b9e-8c4f-4f4e-9f57-0d8f4f4e9f57",
            "points": 1_000_000,
            "action_type": "vehicle_added"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Test: POST /points/award without a user_id is rejected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn award_rejects_missing_user_id() {
    let app = common::build_test_app(common::lazy_pool());

    let response = post_json(
        app,
        "/api/v1/points/award",
        json!({
            "points": 50,
            "action_type": "vehicle_added"
        }),
    )
    .await;

    // Axum's Json extractor rejects the body before the handler runs.
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ---------------------------------------------------------------------------
// Test: POST /streak/evaluate rejects a malformed user_id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn streak_evaluate_rejects_malformed_user_id() {
    let app = common::build_test_app(common::lazy_pool());

    let response = post_json(
        app,
        "/api/v1/streak/evaluate",
        json!({ "user_id": "not-a-uuid" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ---------------------------------------------------------------------------
// Test: POST /alerts/dispatch rejects an unknown alert type
// ---------------------------------------------------------------------------

#[tokio::test]
async fn dispatch_rejects_unknown_alert_type() {
    let app = common::build_test_app(common::lazy_pool());

    let response = post_json(
        app,
        "/api/v1/alerts/dispatch",
        json!({ "alert_type": "price_hike" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_matches!(body["error"].as_str(), Some(msg) if msg.contains("price_hike"));
}

// ---------------------------------------------------------------------------
// Test: POST /referrals/apply rejects an empty code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn apply_referral_rejects_empty_code() {
    let app = common::build_test_app(common::lazy_pool());

    let response = post_json(
        app,
        "/api/v1/referrals/apply",
        json!({
            "user_id": "5f0b6b9e-8c4f-4f4e-9f57-0d8f4f4e9f57",
            "referral_code": "   "
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

//! HTTP-level tests for casting votes and reading results.
//!
//! Requests go straight to the router through `tower::ServiceExt`, over
//! in-memory repositories.

mod common;

use ambassadors_api::config::ServerConfig;
use axum::http::header::RETRY_AFTER;
use axum::http::StatusCode;
use common::{body_json, get, post_json, post_json_from, seed_project};
use serde_json::json;

// ---------------------------------------------------------------------------
// Vote, read results, vote again
// ---------------------------------------------------------------------------

#[tokio::test]
async fn vote_then_duplicate_is_rejected() {
    let (app, state) = common::build_test_app();
    let project = seed_project(&state, "Зелено училище").await;

    let response = post_json(&app, "/api/votes", json!({ "projectId": project.id })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["vote"]["project_id"], project.id.to_string());

    let results = body_json(get(&app, "/api/votes/results").await).await;
    assert_eq!(results["data"]["total_votes"], 1);
    assert_eq!(results["data"]["projects"][0]["id"], project.id.to_string());
    assert_eq!(results["data"]["projects"][0]["vote_count"], 1);

    let response = post_json(&app, "/api/votes", json!({ "projectId": project.id })).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "ALREADY_VOTED");
    assert_eq!(json["error"], "You have already voted for this project");

    let results = body_json(get(&app, "/api/votes/results").await).await;
    assert_eq!(results["data"]["total_votes"], 1);
}

#[tokio::test]
async fn different_addresses_each_get_one_vote() {
    let (app, state) = common::build_test_app();
    let project = seed_project(&state, "P").await;

    for ip in ["198.51.100.1", "198.51.100.2", "2001:db8::1"] {
        let response =
            post_json_from(&app, "/api/votes", json!({ "projectId": project.id }), Some(ip)).await;
        assert_eq!(response.status(), StatusCode::CREATED, "vote from {ip}");
    }

    let json = body_json(get(&app, &format!("/api/projects/{}/votes", project.id)).await).await;
    assert_eq!(json["data"]["vote_count"], 3);
}

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_project_id_is_a_validation_error() {
    let (app, _) = common::build_test_app();

    let response = post_json(&app, "/api/votes", json!({ "projectId": "not-a-uuid" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["errors"][0]["path"], "projectId");
}

#[tokio::test]
async fn missing_body_field_is_a_validation_error() {
    let (app, _) = common::build_test_app();

    let response = post_json(&app, "/api/votes", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["errors"][0]["path"], "body");
}

#[tokio::test]
async fn unknown_project_is_rejected() {
    let (app, _) = common::build_test_app();

    let response = post_json(
        &app,
        "/api/votes",
        json!({ "projectId": "5f0c3a6e-8b7d-4f57-9d3e-2c1a0b9e8f7d" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "PROJECT_NOT_FOUND");
    assert_eq!(json["error"], "Project not found");
}

#[tokio::test]
async fn request_without_client_address_is_rejected() {
    let (app, state) = common::build_test_app();
    let project = seed_project(&state, "P").await;

    let response =
        post_json_from(&app, "/api/votes", json!({ "projectId": project.id }), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "UNKNOWN_CLIENT_IP");

    let response = post_json_from(
        &app,
        "/api/votes",
        json!({ "projectId": project.id }),
        Some("unknown"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Rate limiting
// ---------------------------------------------------------------------------

#[tokio::test]
async fn vote_limiter_rejects_with_retry_after() {
    let (app, state) = common::build_test_app_with(ServerConfig {
        vote_rate_limit_max_requests: 2,
        ..common::test_config()
    });
    let project = seed_project(&state, "P").await;
    let body = json!({ "projectId": project.id });

    assert_eq!(
        post_json(&app, "/api/votes", body.clone()).await.status(),
        StatusCode::CREATED
    );
    // Rejected votes still count against the window.
    assert_eq!(
        post_json(&app, "/api/votes", body.clone()).await.status(),
        StatusCode::CONFLICT
    );

    let response = post_json(&app, "/api/votes", body.clone()).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let retry_after: u64 = response
        .headers()
        .get(RETRY_AFTER)
        .unwrap()
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!((1..=60).contains(&retry_after));
    assert_eq!(body_json(response).await["code"], "RATE_LIMIT_ERROR");

    // Other addresses have their own window.
    let response = post_json_from(&app, "/api/votes", body, Some("198.51.100.7")).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

// ---------------------------------------------------------------------------
// Results and status
// ---------------------------------------------------------------------------

#[tokio::test]
async fn results_are_sorted_by_votes() {
    let (app, state) = common::build_test_app();
    let quiet = seed_project(&state, "Quiet").await;
    let popular = seed_project(&state, "Popular").await;

    for ip in ["198.51.100.1", "198.51.100.2"] {
        post_json_from(&app, "/api/votes", json!({ "projectId": popular.id }), Some(ip)).await;
    }

    let json = body_json(get(&app, "/api/votes/results").await).await;
    let projects = json["data"]["projects"].as_array().unwrap();
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0]["id"], popular.id.to_string());
    assert_eq!(projects[0]["vote_count"], 2);
    assert_eq!(projects[1]["id"], quiet.id.to_string());
    assert_eq!(projects[1]["vote_count"], 0);
    assert_eq!(json["data"]["total_votes"], 2);
}

#[tokio::test]
async fn check_reports_whether_caller_voted() {
    let (app, state) = common::build_test_app();
    let project = seed_project(&state, "P").await;
    let uri = format!("/api/votes/check?projectId={}", project.id);

    let json = body_json(get(&app, &uri).await).await;
    assert_eq!(json["data"]["has_voted"], false);

    post_json(&app, "/api/votes", json!({ "projectId": project.id })).await;

    let json = body_json(get(&app, &uri).await).await;
    assert_eq!(json["data"]["has_voted"], true);

    let response = get(&app, "/api/votes/check").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(&app, &format!("{uri}&projectId={}", project.id)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["errors"][0]["path"], "query");
}

#[tokio::test]
async fn vote_count_for_unknown_project_is_404() {
    let (app, _) = common::build_test_app();

    let response = get(
        &app,
        "/api/projects/5f0c3a6e-8b7d-4f57-9d3e-2c1a0b9e8f7d/votes",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Project not found");
}

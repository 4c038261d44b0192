//! HTTP-level tests for the catalog read endpoints and admin management.

mod common;

use ambassadors_api::config::ServerConfig;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{admin_json, body_json, get, seed_ambassador, seed_project, send, text};
use serde_json::json;

// ---------------------------------------------------------------------------
// Public reads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn lists_and_gets_projects() {
    let (app, state) = common::build_test_app();
    let project = seed_project(&state, "Еко проект").await;

    let json = body_json(get(&app, "/api/projects").await).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"][0]["id"], project.id.to_string());
    assert_eq!(json["data"][0]["title"]["bg"], "Еко проект");
    assert_eq!(json["data"][0]["extra_images"], json!([]));

    let response = get(&app, &format!("/api/projects/{}", project.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["year"], "2024");
}

#[tokio::test]
async fn missing_resources_are_404_envelopes() {
    let (app, _) = common::build_test_app();

    for (uri, message) in [
        (
            "/api/projects/5f0c3a6e-8b7d-4f57-9d3e-2c1a0b9e8f7d",
            "Project not found",
        ),
        ("/api/projects/not-a-uuid", "Project not found"),
        ("/api/ambassadors/42", "Ambassador not found"),
        (
            "/api/teachers/5f0c3a6e-8b7d-4f57-9d3e-2c1a0b9e8f7d",
            "Teacher not found",
        ),
    ] {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["error"], message);
    }
}

#[tokio::test]
async fn ambassadors_sort_by_locale() {
    let (app, state) = common::build_test_app();
    seed_ambassador(&state, text(&[("bg", "Яна"), ("en", "Yana")])).await;
    seed_ambassador(&state, text(&[("bg", "Борис"), ("en", "Boris")])).await;
    seed_ambassador(&state, text(&[("bg", "Ани"), ("en", "Ani")])).await;

    let names = |json: &serde_json::Value, locale: &str| -> Vec<String> {
        json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["name"][locale].as_str().unwrap().to_string())
            .collect()
    };

    let json = body_json(get(&app, "/api/ambassadors?locale=en").await).await;
    assert_eq!(names(&json, "en"), ["Ani", "Boris", "Yana"]);

    let json = body_json(get(&app, "/api/ambassadors?locale=bg").await).await;
    assert_eq!(names(&json, "bg"), ["Ани", "Борис", "Яна"]);

    let response = get(&app, "/api/ambassadors?locale=xx").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["errors"][0]["path"], "locale");
}

#[tokio::test]
async fn malformed_query_string_uses_error_envelope() {
    let (app, _) = common::build_test_app();

    for uri in [
        "/api/ambassadors?locale=en&locale=bg",
        "/api/teachers?locale=en&locale=bg",
    ] {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["errors"][0]["path"], "query");
    }
}

#[tokio::test]
async fn global_limiter_applies_to_reads() {
    let (app, _) = common::build_test_app_with(ServerConfig {
        rate_limit_max_requests: 3,
        ..common::test_config()
    });

    for remaining in ["2", "1", "0"] {
        let response = get(&app, "/api/projects").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-ratelimit-limit"], "3");
        assert_eq!(response.headers()["x-ratelimit-remaining"], remaining);
    }
    let response = get(&app, "/api/teachers").await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key("retry-after"));

    // Health is outside /api.
    assert_eq!(get(&app, "/health").await.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Admin guard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn admin_routes_require_token() {
    let (app, _) = common::build_test_app();
    let body = json!({ "title": { "bg": "Нов" } });

    let request = Request::post("/api/admin/projects")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");

    let request = Request::post("/api/admin/projects")
        .header("content-type", "application/json")
        .header("authorization", "Bearer wrong-token")
        .body(Body::from(body.to_string()))
        .unwrap();
    assert_eq!(send(&app, request).await.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_routes_are_closed_without_configured_token() {
    let (app, _) = common::build_test_app_with(ServerConfig {
        admin_token: None,
        ..common::test_config()
    });

    let response = admin_json(
        &app,
        "POST",
        "/api/admin/projects",
        Some(json!({ "title": { "bg": "Нов" } })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Admin CRUD
// ---------------------------------------------------------------------------

#[tokio::test]
async fn admin_manages_projects() {
    let (app, _) = common::build_test_app();

    let response = admin_json(
        &app,
        "POST",
        "/api/admin/projects",
        Some(json!({
            "title": { "bg": "Градина", "en": "Garden" },
            "image_url": "/placeholder.svg",
            "extra_images": ["https://cdn.example.com/1.jpg"]
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(created["data"]["extra_images"][0], "https://cdn.example.com/1.jpg");

    let response = admin_json(
        &app,
        "PUT",
        &format!("/api/admin/projects/{id}"),
        Some(json!({ "year": "2025" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["data"]["year"], "2025");
    assert_eq!(updated["data"]["title"]["en"], "Garden");

    let response = admin_json(&app, "DELETE", &format!("/api/admin/projects/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["id"], id);

    let response = get(&app, &format!("/api/projects/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = admin_json(&app, "DELETE", &format!("/api/admin/projects/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_create_validates_input() {
    let (app, _) = common::build_test_app();

    let response = admin_json(
        &app,
        "POST",
        "/api/admin/ambassadors",
        Some(json!({ "name": {}, "age": 0 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let paths: Vec<&str> = json["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, ["age", "name"]);
}

#[tokio::test]
async fn admin_manages_teachers() {
    let (app, _) = common::build_test_app();

    let response = admin_json(
        &app,
        "POST",
        "/api/admin/teachers",
        Some(json!({ "name": { "bg": "Иванова" }, "subject": { "bg": "Химия" } })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let json = body_json(get(&app, &format!("/api/teachers/{id}")).await).await;
    assert_eq!(json["data"]["subject"]["bg"], "Химия");

    let response = admin_json(
        &app,
        "PUT",
        "/api/admin/teachers/5f0c3a6e-8b7d-4f57-9d3e-2c1a0b9e8f7d",
        Some(json!({ "bio": { "en": "Chemistry" } })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_deletes_votes() {
    let (app, state) = common::build_test_app();
    let project = seed_project(&state, "P").await;

    let response = common::post_json(&app, "/api/votes", json!({ "projectId": project.id })).await;
    let vote_id = body_json(response).await["data"]["vote"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = admin_json(&app, "DELETE", &format!("/api/admin/votes/{vote_id}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(&app, "/api/votes/results").await).await;
    assert_eq!(json["data"]["total_votes"], 0);
}

#[tokio::test]
async fn deleting_a_project_removes_its_votes() {
    let (app, state) = common::build_test_app();
    let removed = seed_project(&state, "Removed").await;
    let kept = seed_project(&state, "Kept").await;
    for project in [&removed, &kept] {
        let response = common::post_json(&app, "/api/votes", json!({ "projectId": project.id })).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let uri = format!("/api/admin/projects/{}", removed.id);
    assert_eq!(admin_json(&app, "DELETE", &uri, None).await.status(), StatusCode::OK);

    let json = body_json(get(&app, "/api/votes/results").await).await;
    assert_eq!(json["data"]["total_votes"], 1);

    let json = body_json(admin_json(&app, "GET", "/api/admin/votes", None).await).await;
    let votes = json["data"].as_array().unwrap();
    assert_eq!(votes.len(), 1);
    assert_eq!(votes[0]["project_id"], kept.id.to_string());

    let uri = format!("/api/votes/check?projectId={}", removed.id);
    let json = body_json(get(&app, &uri).await).await;
    assert_eq!(json["data"]["has_voted"], false);
}

#![allow(dead_code)]

use std::sync::Arc;

use ambassadors_core::localized::LocalizedText;
use ambassadors_core::rate_limit::InMemoryRateLimitStore;
use ambassadors_db::models::ambassador::{Ambassador, CreateAmbassador};
use ambassadors_db::models::project::{CreateProject, Project};
use ambassadors_db::repositories::Repositories;
use ambassadors_db::DbPool;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use ambassadors_api::config::ServerConfig;
use ambassadors_api::router::build_app_router;
use ambassadors_api::state::AppState;

/// Admin token configured by [`test_config`].
pub const ADMIN_TOKEN: &str = "test-admin-token";

/// Client address sent by the request helpers.
pub const CLIENT_IP: &str = "203.0.113.10";

/// Build a test `ServerConfig` with safe defaults and an admin token.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        admin_token: Some(ADMIN_TOKEN.to_string()),
        ..ServerConfig::default()
    }
}

/// Application state over in-memory repositories.
pub fn test_state(config: ServerConfig) -> AppState {
    AppState::new(
        config,
        Repositories::in_memory(),
        None,
        Arc::new(InMemoryRateLimitStore::new()),
    )
}

/// Application state over PostgreSQL repositories.
pub fn pg_state(pool: DbPool) -> AppState {
    AppState::new(
        test_config(),
        Repositories::postgres(pool.clone()),
        Some(pool),
        Arc::new(InMemoryRateLimitStore::new()),
    )
}

/// Build the full application router (same middleware stack as `main.rs`)
/// together with its state, so tests can seed data through the services.
pub fn build_test_app() -> (Router, AppState) {
    build_test_app_with(test_config())
}

pub fn build_test_app_with(config: ServerConfig) -> (Router, AppState) {
    let state = test_state(config);
    (build_app_router(state.clone()), state)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn text(pairs: &[(&str, &str)]) -> LocalizedText {
    pairs.iter().copied().collect()
}

pub async fn seed_project(state: &AppState, title: &str) -> Project {
    state
        .services
        .projects
        .create(CreateProject {
            title: text(&[("bg", title)]),
            short_description: None,
            long_description: None,
            image_url: None,
            extra_images: Vec::new(),
            year: Some("2024".into()),
        })
        .await
        .unwrap()
}

pub async fn seed_ambassador(state: &AppState, name: LocalizedText) -> Ambassador {
    state
        .services
        .ambassadors
        .create(CreateAmbassador {
            name,
            bio: None,
            image_url: None,
            year: None,
            age: None,
        })
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::get(uri)
        .header("x-forwarded-for", CLIENT_IP)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_json_from(app, uri, body, Some(CLIENT_IP)).await
}

/// POST as the given client address, or with no address headers at all.
pub async fn post_json_from(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
    ip: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::post(uri).header("content-type", "application/json");
    if let Some(ip) = ip {
        builder = builder.header("x-forwarded-for", ip);
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

/// Send a JSON request with the admin bearer token.
pub async fn admin_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-forwarded-for", CLIENT_IP)
        .header("authorization", format!("Bearer {ADMIN_TOKEN}"));
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    };
    send(app, request.unwrap()).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

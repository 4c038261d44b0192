//! Catalog management and vote moderation.
//!
//! Every handler behind these routes takes
//! [`RequireAdmin`](crate::middleware::admin::RequireAdmin).

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{ambassadors, projects, teachers, votes};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST     /projects             projects::create
/// PUT      /projects/{id}        projects::update
/// DELETE   /projects/{id}        projects::delete
/// POST     /ambassadors          ambassadors::create
/// PUT      /ambassadors/{id}     ambassadors::update
/// DELETE   /ambassadors/{id}     ambassadors::delete
/// POST     /teachers             teachers::create
/// PUT      /teachers/{id}        teachers::update
/// DELETE   /teachers/{id}        teachers::delete
/// GET      /votes                votes::list
/// DELETE   /votes/{id}           votes::delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", post(projects::create))
        .route(
            "/projects/{id}",
            put(projects::update).delete(projects::delete),
        )
        .route("/ambassadors", post(ambassadors::create))
        .route(
            "/ambassadors/{id}",
            put(ambassadors::update).delete(ambassadors::delete),
        )
        .route("/teachers", post(teachers::create))
        .route(
            "/teachers/{id}",
            put(teachers::update).delete(teachers::delete),
        )
        .route("/votes", get(votes::list))
        .route("/votes/{id}", delete(votes::delete))
}

pub mod admin;
pub mod ambassadors;
pub mod health;
pub mod projects;
pub mod teachers;
pub mod votes;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /votes                                POST cast vote
/// /votes/results                        GET results
/// /votes/check?projectId=               GET has the caller voted
///
/// /projects                             GET list
/// /projects/{id}                        GET
/// /projects/{id}/votes                  GET vote count
///
/// /ambassadors[?locale=]                GET list
/// /ambassadors/{id}                     GET
///
/// /teachers[?locale=]                   GET list
/// /teachers/{id}                        GET
///
/// /admin/{projects,ambassadors,teachers}        POST
/// /admin/{projects,ambassadors,teachers}/{id}   PUT, DELETE
/// /admin/votes/{id}                             DELETE
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/votes", votes::router())
        .nest("/projects", projects::router())
        .nest("/ambassadors", ambassadors::router())
        .nest("/teachers", teachers::router())
        .nest("/admin", admin::router())
}

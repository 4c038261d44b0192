use axum::routing::get;
use axum::Router;

use crate::handlers::projects;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                list
/// GET    /{id}            get_by_id
/// GET    /{id}/votes      vote_count
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::list))
        .route("/{id}", get(projects::get_by_id))
        .route("/{id}/votes", get(projects::vote_count))
}

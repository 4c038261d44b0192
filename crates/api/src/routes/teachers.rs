use axum::routing::get;
use axum::Router;

use crate::handlers::teachers;
use crate::state::AppState;

/// Routes mounted at `/teachers`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(teachers::list))
        .route("/{id}", get(teachers::get_by_id))
}

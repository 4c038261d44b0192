use axum::routing::get;
use axum::Router;

use crate::handlers::ambassadors;
use crate::state::AppState;

/// Routes mounted at `/ambassadors`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(ambassadors::list))
        .route("/{id}", get(ambassadors::get_by_id))
}

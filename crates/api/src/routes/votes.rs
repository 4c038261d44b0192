use axum::routing::{get, post};
use axum::Router;

use crate::handlers::votes;
use crate::state::AppState;

/// Routes mounted at `/votes`.
///
/// ```text
/// POST   /            create
/// GET    /results     results
/// GET    /check       check
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(votes::create))
        .route("/results", get(votes::results))
        .route("/check", get(votes::check))
}

//! Handlers for casting votes and reading results.
//!
//! The caller is identified by [`ClientIp`]. Vote submissions pass through
//! the vote rate limiter before any store access.

use ambassadors_core::types::DbId;
use ambassadors_db::models::vote::Vote;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use super::Deleted;
use crate::error::{AppError, AppResult};
use crate::extract::{ClientIp, JsonBody, QueryParams};
use crate::middleware::admin::RequireAdmin;
use crate::query::ProjectIdParams;
use crate::response::{created, ok};
use crate::services::vote::PROJECT_NOT_FOUND_MESSAGE;
use crate::services::VoteOutcome;
use crate::state::AppState;

/// Body of `POST /api/votes`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub project_id: String,
}

#[derive(Debug, Serialize)]
pub struct VoteCreated {
    pub vote: Vote,
}

#[derive(Debug, Serialize)]
pub struct VoteStatus {
    pub project_id: String,
    pub has_voted: bool,
}

/// POST /api/votes
///
/// Record one vote per project for the calling address.
pub async fn create(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    JsonBody(input): JsonBody<VoteRequest>,
) -> AppResult<impl IntoResponse> {
    state.vote_limiter.check(&ip).await?;

    match state.services.votes.vote(&input.project_id, &ip).await? {
        VoteOutcome::Recorded(vote) => {
            tracing::info!(vote_id = %vote.id, project_id = %vote.project_id, "Vote recorded");
            Ok(created(VoteCreated { vote }))
        }
        VoteOutcome::ProjectNotFound => Err(AppError::BadRequest {
            code: "PROJECT_NOT_FOUND",
            message: PROJECT_NOT_FOUND_MESSAGE.to_string(),
        }),
        outcome @ VoteOutcome::AlreadyVoted => Err(AppError::Conflict {
            code: "ALREADY_VOTED",
            message: outcome.message().unwrap_or_default().to_string(),
        }),
    }
}

/// GET /api/votes/results
pub async fn results(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let results = state.services.votes.results().await?;
    Ok(ok(results))
}

/// GET /api/votes/check?projectId=
pub async fn check(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    QueryParams(params): QueryParams<ProjectIdParams>,
) -> AppResult<impl IntoResponse> {
    let has_voted = state
        .services
        .votes
        .has_voted(&params.project_id, &ip)
        .await?;
    Ok(ok(VoteStatus {
        project_id: params.project_id,
        has_voted,
    }))
}

/// GET /api/admin/votes
pub async fn list(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let votes = state.services.votes.list().await?;
    Ok(ok(votes))
}

/// DELETE /api/admin/votes/{id}
pub async fn delete(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id: DbId = super::parse_path_id("Vote", &id)?;
    state.services.votes.delete(id).await?;
    Ok(ok(Deleted { id }))
}

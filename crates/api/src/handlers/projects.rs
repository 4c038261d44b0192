//! Handlers for projects.
//!
//! Reads are public. Writes live under `/api/admin` and require
//! [`RequireAdmin`].

use ambassadors_core::types::DbId;
use ambassadors_db::models::project::{CreateProject, UpdateProject};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use serde::Serialize;

use super::{parse_path_id, Deleted};
use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::middleware::admin::RequireAdmin;
use crate::response::{created, ok};
use crate::state::AppState;

const ENTITY: &str = "Project";

/// Vote count for a single project.
#[derive(Debug, Serialize)]
pub struct ProjectVoteCount {
    pub project_id: DbId,
    pub vote_count: i64,
}

/// GET /api/projects
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let projects = state.services.projects.list().await?;
    Ok(ok(projects))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_path_id(ENTITY, &id)?;
    let project = state.services.projects.get(id).await?;
    Ok(ok(project))
}

/// GET /api/projects/{id}/votes
pub async fn vote_count(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let project_id = parse_path_id(ENTITY, &id)?;
    let vote_count = state.services.votes.vote_count_for_project(project_id).await?;
    Ok(ok(ProjectVoteCount {
        project_id,
        vote_count,
    }))
}

/// POST /api/admin/projects
pub async fn create(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateProject>,
) -> AppResult<impl IntoResponse> {
    let project = state.services.projects.create(input).await?;
    Ok(created(project))
}

/// PUT /api/admin/projects/{id}
///
/// Fields left out of the body keep their current value.
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<UpdateProject>,
) -> AppResult<impl IntoResponse> {
    let id = parse_path_id(ENTITY, &id)?;
    let project = state.services.projects.update(id, input).await?;
    Ok(ok(project))
}

/// DELETE /api/admin/projects/{id}
///
/// Votes for the project are removed with it.
pub async fn delete(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_path_id(ENTITY, &id)?;
    state.services.projects.delete(id).await?;
    Ok(ok(Deleted { id }))
}

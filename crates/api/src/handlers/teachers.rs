//! Handlers for teachers.

use ambassadors_db::models::teacher::{CreateTeacher, UpdateTeacher};
use axum::extract::{Path, State};
use axum::response::IntoResponse;

use super::{parse_path_id, Deleted};
use crate::error::AppResult;
use crate::extract::{JsonBody, QueryParams};
use crate::middleware::admin::RequireAdmin;
use crate::query::LocaleParams;
use crate::response::{created, ok};
use crate::state::AppState;

const ENTITY: &str = "Teacher";

/// GET /api/teachers
///
/// Newest first, or alphabetical by name when `?locale=` is given.
pub async fn list(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<LocaleParams>,
) -> AppResult<impl IntoResponse> {
    let locale = params.resolve()?;
    let teachers = state.services.teachers.list_for_locale(locale).await?;
    Ok(ok(teachers))
}

/// GET /api/teachers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_path_id(ENTITY, &id)?;
    let teacher = state.services.teachers.get(id).await?;
    Ok(ok(teacher))
}

/// POST /api/admin/teachers
pub async fn create(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateTeacher>,
) -> AppResult<impl IntoResponse> {
    let teacher = state.services.teachers.create(input).await?;
    Ok(created(teacher))
}

/// PUT /api/admin/teachers/{id}
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<UpdateTeacher>,
) -> AppResult<impl IntoResponse> {
    let id = parse_path_id(ENTITY, &id)?;
    let teacher = state.services.teachers.update(id, input).await?;
    Ok(ok(teacher))
}

/// DELETE /api/admin/teachers/{id}
pub async fn delete(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_path_id(ENTITY, &id)?;
    state.services.teachers.delete(id).await?;
    Ok(ok(Deleted { id }))
}

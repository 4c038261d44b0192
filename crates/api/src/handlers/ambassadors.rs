//! Handlers for ambassadors.

use ambassadors_db::models::ambassador::{CreateAmbassador, UpdateAmbassador};
use axum::extract::{Path, State};
use axum::response::IntoResponse;

use super::{parse_path_id, Deleted};
use crate::error::AppResult;
use crate::extract::{JsonBody, QueryParams};
use crate::middleware::admin::RequireAdmin;
use crate::query::LocaleParams;
use crate::response::{created, ok};
use crate::state::AppState;

const ENTITY: &str = "Ambassador";

/// GET /api/ambassadors
///
/// Newest first, or alphabetical by name when `?locale=` is given.
pub async fn list(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<LocaleParams>,
) -> AppResult<impl IntoResponse> {
    let locale = params.resolve()?;
    let ambassadors = state.services.ambassadors.list_for_locale(locale).await?;
    Ok(ok(ambassadors))
}

/// GET /api/ambassadors/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_path_id(ENTITY, &id)?;
    let ambassador = state.services.ambassadors.get(id).await?;
    Ok(ok(ambassador))
}

/// POST /api/admin/ambassadors
pub async fn create(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateAmbassador>,
) -> AppResult<impl IntoResponse> {
    let ambassador = state.services.ambassadors.create(input).await?;
    Ok(created(ambassador))
}

/// PUT /api/admin/ambassadors/{id}
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<UpdateAmbassador>,
) -> AppResult<impl IntoResponse> {
    let id = parse_path_id(ENTITY, &id)?;
    let ambassador = state.services.ambassadors.update(id, input).await?;
    Ok(ok(ambassador))
}

/// DELETE /api/admin/ambassadors/{id}
pub async fn delete(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_path_id(ENTITY, &id)?;
    state.services.ambassadors.delete(id).await?;
    Ok(ok(Deleted { id }))
}

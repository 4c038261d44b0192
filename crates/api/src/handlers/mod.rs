pub mod ambassadors;
pub mod projects;
pub mod teachers;
pub mod votes;

use ambassadors_core::error::CoreError;
use ambassadors_core::types::DbId;
use serde::Serialize;

/// Parse an `{id}` path segment. A malformed id cannot name an existing
/// row, so it reads as not found.
pub(crate) fn parse_path_id(entity: &'static str, raw: &str) -> Result<DbId, CoreError> {
    DbId::parse_str(raw).map_err(|_| CoreError::not_found(entity, raw))
}

/// Payload returned by delete endpoints.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: DbId,
}

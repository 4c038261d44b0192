//! Vote entity model and DTOs.

use ambassadors_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A vote row from the `votes` table.
///
/// `(project_id, voter_ip)` is unique; votes are never updated.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Vote {
    pub id: DbId,
    pub project_id: DbId,
    pub voter_ip: String,
    pub created_at: Timestamp,
}

/// DTO for recording a vote.
#[derive(Debug, Clone)]
pub struct CreateVote {
    pub project_id: DbId,
    pub voter_ip: String,
}

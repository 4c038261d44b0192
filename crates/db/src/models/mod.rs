//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `Serialize` entity struct as returned to clients
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - A `Deserialize` + `Validate` update DTO (all `Option` fields) for patches

pub mod ambassador;
pub mod project;
pub mod teacher;
pub mod vote;

use ambassadors_core::localized::LocalizedText;
use ambassadors_core::types::{DbId, Timestamp};
use validator::Validate;

/// A catalog row managed through the generic repository and service layers.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Display name used in not-found errors (`"Project not found"`).
    const NAME: &'static str;

    type Create: Validate + Send + Sync;
    type Update: Validate + Send + Sync;

    fn id(&self) -> DbId;

    fn created_at(&self) -> Timestamp;

    /// Build a row from a create DTO. Used by stores that assign ids and
    /// timestamps themselves.
    fn from_create(id: DbId, created_at: Timestamp, input: &Self::Create) -> Self;

    /// Apply the `Some` fields of an update DTO.
    fn apply_update(&mut self, input: &Self::Update);
}

/// Entities listed alphabetically by a localized name.
pub trait Named {
    fn name(&self) -> &LocalizedText;
}

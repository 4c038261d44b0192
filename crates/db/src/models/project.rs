//! Project entity model and DTOs.

use ambassadors_core::localized::LocalizedText;
use ambassadors_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Entity;

/// A student project that can receive votes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: DbId,
    pub title: LocalizedText,
    pub short_description: Option<LocalizedText>,
    pub long_description: Option<LocalizedText>,
    pub image_url: Option<String>,
    pub extra_images: Vec<String>,
    pub year: Option<String>,
    pub created_at: Timestamp,
}

/// A project with its vote count, computed at query time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectWithVotes {
    #[serde(flatten)]
    pub project: Project,
    pub vote_count: i64,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(custom(function = "ambassadors_core::validation::localized_required"))]
    pub title: LocalizedText,
    pub short_description: Option<LocalizedText>,
    pub long_description: Option<LocalizedText>,
    #[validate(custom(function = "ambassadors_core::validation::image_url"))]
    pub image_url: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "ambassadors_core::validation::url_list"))]
    pub extra_images: Vec<String>,
    pub year: Option<String>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProject {
    #[validate(custom(function = "ambassadors_core::validation::localized_required"))]
    pub title: Option<LocalizedText>,
    pub short_description: Option<LocalizedText>,
    pub long_description: Option<LocalizedText>,
    #[validate(custom(function = "ambassadors_core::validation::image_url"))]
    pub image_url: Option<String>,
    #[validate(custom(function = "ambassadors_core::validation::url_list"))]
    pub extra_images: Option<Vec<String>>,
    pub year: Option<String>,
}

/// Decode the `extra_images` column.
///
/// The column stores a JSON-encoded array as text. Anything that does not
/// decode to a list of strings reads as an empty list.
pub fn parse_extra_images(raw: Option<&str>) -> Vec<String> {
    raw.and_then(|raw| serde_json::from_str(raw).ok())
        .unwrap_or_default()
}

/// Encode a list of image URLs for the `extra_images` column.
pub fn encode_extra_images(images: &[String]) -> String {
    serde_json::to_string(images).unwrap_or_else(|_| "[]".to_string())
}

impl Entity for Project {
    const NAME: &'static str = "Project";

    type Create = CreateProject;
    type Update = UpdateProject;

    fn id(&self) -> DbId {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn from_create(id: DbId, created_at: Timestamp, input: &CreateProject) -> Self {
        Self {
            id,
            title: input.title.clone(),
            short_description: input.short_description.clone(),
            long_description: input.long_description.clone(),
            image_url: input.image_url.clone(),
            extra_images: input.extra_images.clone(),
            year: input.year.clone(),
            created_at,
        }
    }

    fn apply_update(&mut self, input: &UpdateProject) {
        if let Some(title) = &input.title {
            self.title = title.clone();
        }
        if input.short_description.is_some() {
            self.short_description = input.short_description.clone();
        }
        if input.long_description.is_some() {
            self.long_description = input.long_description.clone();
        }
        if input.image_url.is_some() {
            self.image_url = input.image_url.clone();
        }
        if let Some(images) = &input.extra_images {
            self.extra_images = images.clone();
        }
        if input.year.is_some() {
            self.year = input.year.clone();
        }
    }
}

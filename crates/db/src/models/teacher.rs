//! Teacher entity model and DTOs.

use ambassadors_core::localized::LocalizedText;
use ambassadors_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Entity, Named};

/// A mentoring teacher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: DbId,
    pub name: LocalizedText,
    pub subject: Option<LocalizedText>,
    pub bio: Option<LocalizedText>,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a new teacher.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTeacher {
    #[validate(custom(function = "ambassadors_core::validation::localized_required"))]
    pub name: LocalizedText,
    pub subject: Option<LocalizedText>,
    pub bio: Option<LocalizedText>,
    #[validate(custom(function = "ambassadors_core::validation::image_url"))]
    pub image_url: Option<String>,
}

/// DTO for updating an existing teacher. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTeacher {
    #[validate(custom(function = "ambassadors_core::validation::localized_required"))]
    pub name: Option<LocalizedText>,
    pub subject: Option<LocalizedText>,
    pub bio: Option<LocalizedText>,
    #[validate(custom(function = "ambassadors_core::validation::image_url"))]
    pub image_url: Option<String>,
}

impl Entity for Teacher {
    const NAME: &'static str = "Teacher";

    type Create = CreateTeacher;
    type Update = UpdateTeacher;

    fn id(&self) -> DbId {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn from_create(id: DbId, created_at: Timestamp, input: &CreateTeacher) -> Self {
        Self {
            id,
            name: input.name.clone(),
            subject: input.subject.clone(),
            bio: input.bio.clone(),
            image_url: input.image_url.clone(),
            created_at,
        }
    }

    fn apply_update(&mut self, input: &UpdateTeacher) {
        if let Some(name) = &input.name {
            self.name = name.clone();
        }
        if input.subject.is_some() {
            self.subject = input.subject.clone();
        }
        if input.bio.is_some() {
            self.bio = input.bio.clone();
        }
        if input.image_url.is_some() {
            self.image_url = input.image_url.clone();
        }
    }
}

impl Named for Teacher {
    fn name(&self) -> &LocalizedText {
        &self.name
    }
}

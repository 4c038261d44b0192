//! Ambassador entity model and DTOs.

use ambassadors_core::localized::LocalizedText;
use ambassadors_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Entity, Named};

/// A student ambassador.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ambassador {
    pub id: DbId,
    pub name: LocalizedText,
    pub bio: Option<LocalizedText>,
    pub image_url: Option<String>,
    /// School year, free text (e.g. `"11B"`).
    pub year: Option<String>,
    pub age: Option<i32>,
    pub created_at: Timestamp,
}

/// DTO for creating a new ambassador.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAmbassador {
    #[validate(custom(function = "ambassadors_core::validation::localized_required"))]
    pub name: LocalizedText,
    pub bio: Option<LocalizedText>,
    #[validate(custom(function = "ambassadors_core::validation::image_url"))]
    pub image_url: Option<String>,
    pub year: Option<String>,
    #[validate(range(min = 1, message = "Age must be a positive number"))]
    pub age: Option<i32>,
}

/// DTO for updating an existing ambassador. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAmbassador {
    #[validate(custom(function = "ambassadors_core::validation::localized_required"))]
    pub name: Option<LocalizedText>,
    pub bio: Option<LocalizedText>,
    #[validate(custom(function = "ambassadors_core::validation::image_url"))]
    pub image_url: Option<String>,
    pub year: Option<String>,
    #[validate(range(min = 1, message = "Age must be a positive number"))]
    pub age: Option<i32>,
}

impl Entity for Ambassador {
    const NAME: &'static str = "Ambassador";

    type Create = CreateAmbassador;
    type Update = UpdateAmbassador;

    fn id(&self) -> DbId {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn from_create(id: DbId, created_at: Timestamp, input: &CreateAmbassador) -> Self {
        Self {
            id,
            name: input.name.clone(),
            bio: input.bio.clone(),
            image_url: input.image_url.clone(),
            year: input.year.clone(),
            age: input.age,
            created_at,
        }
    }

    fn apply_update(&mut self, input: &UpdateAmbassador) {
        if let Some(name) = &input.name {
            self.name = name.clone();
        }
        if input.bio.is_some() {
            self.bio = input.bio.clone();
        }
        if input.image_url.is_some() {
            self.image_url = input.image_url.clone();
        }
        if input.year.is_some() {
            self.year = input.year.clone();
        }
        if input.age.is_some() {
            self.age = input.age;
        }
    }
}

impl Named for Ambassador {
    fn name(&self) -> &LocalizedText {
        &self.name
    }
}

//! CRUD service shared by ambassadors, teachers and projects.

use std::sync::Arc;

use ambassadors_core::error::CoreError;
use ambassadors_core::localized::sort_by_localized;
use ambassadors_core::types::DbId;
use ambassadors_core::validation::validate;
use ambassadors_db::models::ambassador::Ambassador;
use ambassadors_db::models::project::Project;
use ambassadors_db::models::teacher::Teacher;
use ambassadors_db::models::{Entity, Named};
use ambassadors_db::repositories::EntityRepository;

/// Validated CRUD over one catalog entity.
pub struct CatalogService<E: Entity> {
    repo: Arc<dyn EntityRepository<E>>,
}

pub type AmbassadorService = CatalogService<Ambassador>;
pub type TeacherService = CatalogService<Teacher>;
pub type ProjectService = CatalogService<Project>;

impl<E: Entity> CatalogService<E> {
    pub fn new(repo: Arc<dyn EntityRepository<E>>) -> Self {
        Self { repo }
    }

    /// All rows, newest first.
    pub async fn list(&self) -> Result<Vec<E>, CoreError> {
        self.repo.find_all().await
    }

    pub async fn get(&self, id: DbId) -> Result<E, CoreError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found(E::NAME, id))
    }

    pub async fn create(&self, input: E::Create) -> Result<E, CoreError> {
        validate(&input)?;
        let created = self.repo.create(&input).await?;
        tracing::info!(entity = E::NAME, id = %created.id(), "Created");
        Ok(created)
    }

    pub async fn update(&self, id: DbId, input: E::Update) -> Result<E, CoreError> {
        validate(&input)?;
        let updated = self
            .repo
            .update(id, &input)
            .await?
            .ok_or_else(|| CoreError::not_found(E::NAME, id))?;
        tracing::info!(entity = E::NAME, %id, "Updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: DbId) -> Result<(), CoreError> {
        if !self.repo.delete(id).await? {
            return Err(CoreError::not_found(E::NAME, id));
        }
        tracing::info!(entity = E::NAME, %id, "Deleted");
        Ok(())
    }
}

impl<E: Entity + Named> CatalogService<E> {
    /// All rows, or sorted by localized name when a locale is given.
    pub async fn list_for_locale(&self, locale: Option<&str>) -> Result<Vec<E>, CoreError> {
        let mut rows = self.list().await?;
        if let Some(locale) = locale {
            sort_by_localized(&mut rows, locale, |row: &E| row.name());
        }
        Ok(rows)
    }
}

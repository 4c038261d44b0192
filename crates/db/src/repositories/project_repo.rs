//! Repository for the `projects` table.

use ambassadors_core::error::CoreError;
use ambassadors_core::localized::LocalizedText;
use ambassadors_core::types::{DbId, Timestamp};
use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use super::{db_error, EntityRepository};
use crate::models::project::{
    encode_extra_images, parse_extra_images, CreateProject, Project, UpdateProject,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, short_description, long_description, image_url, \
                       extra_images, year, created_at";

#[derive(FromRow)]
struct ProjectRow {
    id: DbId,
    title: Json<LocalizedText>,
    short_description: Option<Json<LocalizedText>>,
    long_description: Option<Json<LocalizedText>>,
    image_url: Option<String>,
    extra_images: Option<String>,
    year: Option<String>,
    created_at: Timestamp,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: row.id,
            title: row.title.0,
            short_description: row.short_description.map(|j| j.0),
            long_description: row.long_description.map(|j| j.0),
            image_url: row.image_url,
            extra_images: parse_extra_images(row.extra_images.as_deref()),
            year: row.year,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL-backed project repository.
pub struct PgProjectRepo {
    pool: PgPool,
}

impl PgProjectRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityRepository<Project> for PgProjectRepo {
    async fn find_all(&self) -> Result<Vec<Project>, CoreError> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY created_at DESC, id DESC");
        let rows = sqlx::query_as::<_, ProjectRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("findAll projects"))?;
        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Project>, CoreError> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        let row = sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("findById project"))?;
        Ok(row.map(Project::from))
    }

    async fn create(&self, input: &CreateProject) -> Result<Project, CoreError> {
        let query = format!(
            "INSERT INTO projects
                (title, short_description, long_description, image_url, extra_images, year)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProjectRow>(&query)
            .bind(Json(&input.title))
            .bind(input.short_description.as_ref().map(Json))
            .bind(input.long_description.as_ref().map(Json))
            .bind(&input.image_url)
            .bind(encode_extra_images(&input.extra_images))
            .bind(&input.year)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("create project"))?;
        Ok(row.into())
    }

    async fn update(&self, id: DbId, input: &UpdateProject) -> Result<Option<Project>, CoreError> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                short_description = COALESCE($3, short_description),
                long_description = COALESCE($4, long_description),
                image_url = COALESCE($5, image_url),
                extra_images = COALESCE($6, extra_images),
                year = COALESCE($7, year)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .bind(input.title.as_ref().map(Json))
            .bind(input.short_description.as_ref().map(Json))
            .bind(input.long_description.as_ref().map(Json))
            .bind(&input.image_url)
            .bind(input.extra_images.as_deref().map(encode_extra_images))
            .bind(&input.year)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("update project"))?;
        Ok(row.map(Project::from))
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("delete project"))?;
        Ok(result.rows_affected() > 0)
    }
}

//! Repository for the `teachers` table.

use ambassadors_core::error::CoreError;
use ambassadors_core::localized::LocalizedText;
use ambassadors_core::types::{DbId, Timestamp};
use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use super::{db_error, EntityRepository};
use crate::models::teacher::{CreateTeacher, Teacher, UpdateTeacher};

const COLUMNS: &str = "id, name, subject, bio, image_url, created_at";

#[derive(FromRow)]
struct TeacherRow {
    id: DbId,
    name: Json<LocalizedText>,
    subject: Option<Json<LocalizedText>>,
    bio: Option<Json<LocalizedText>>,
    image_url: Option<String>,
    created_at: Timestamp,
}

impl From<TeacherRow> for Teacher {
    fn from(row: TeacherRow) -> Self {
        Self {
            id: row.id,
            name: row.name.0,
            subject: row.subject.map(|j| j.0),
            bio: row.bio.map(|j| j.0),
            image_url: row.image_url,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL-backed teacher repository.
pub struct PgTeacherRepo {
    pool: PgPool,
}

impl PgTeacherRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityRepository<Teacher> for PgTeacherRepo {
    async fn find_all(&self) -> Result<Vec<Teacher>, CoreError> {
        let query = format!("SELECT {COLUMNS} FROM teachers ORDER BY created_at DESC, id DESC");
        let rows = sqlx::query_as::<_, TeacherRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("findAll teachers"))?;
        Ok(rows.into_iter().map(Teacher::from).collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Teacher>, CoreError> {
        let query = format!("SELECT {COLUMNS} FROM teachers WHERE id = $1");
        let row = sqlx::query_as::<_, TeacherRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("findById teacher"))?;
        Ok(row.map(Teacher::from))
    }

    async fn create(&self, input: &CreateTeacher) -> Result<Teacher, CoreError> {
        let query = format!(
            "INSERT INTO teachers (name, subject, bio, image_url)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, TeacherRow>(&query)
            .bind(Json(&input.name))
            .bind(input.subject.as_ref().map(Json))
            .bind(input.bio.as_ref().map(Json))
            .bind(&input.image_url)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("create teacher"))?;
        Ok(row.into())
    }

    async fn update(&self, id: DbId, input: &UpdateTeacher) -> Result<Option<Teacher>, CoreError> {
        let query = format!(
            "UPDATE teachers SET
                name = COALESCE($2, name),
                subject = COALESCE($3, subject),
                bio = COALESCE($4, bio),
                image_url = COALESCE($5, image_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, TeacherRow>(&query)
            .bind(id)
            .bind(input.name.as_ref().map(Json))
            .bind(input.subject.as_ref().map(Json))
            .bind(input.bio.as_ref().map(Json))
            .bind(&input.image_url)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("update teacher"))?;
        Ok(row.map(Teacher::from))
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        let result = sqlx::query("DELETE FROM teachers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("delete teacher"))?;
        Ok(result.rows_affected() > 0)
    }
}

//! Repository for the `ambassadors` table.

use ambassadors_core::error::CoreError;
use ambassadors_core::localized::LocalizedText;
use ambassadors_core::types::{DbId, Timestamp};
use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use super::{db_error, EntityRepository};
use crate::models::ambassador::{Ambassador, CreateAmbassador, UpdateAmbassador};

const COLUMNS: &str = "id, name, bio, image_url, year, age, created_at";

#[derive(FromRow)]
struct AmbassadorRow {
    id: DbId,
    name: Json<LocalizedText>,
    bio: Option<Json<LocalizedText>>,
    image_url: Option<String>,
    year: Option<String>,
    age: Option<i32>,
    created_at: Timestamp,
}

impl From<AmbassadorRow> for Ambassador {
    fn from(row: AmbassadorRow) -> Self {
        Self {
            id: row.id,
            name: row.name.0,
            bio: row.bio.map(|j| j.0),
            image_url: row.image_url,
            year: row.year,
            age: row.age,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL-backed ambassador repository.
pub struct PgAmbassadorRepo {
    pool: PgPool,
}

impl PgAmbassadorRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityRepository<Ambassador> for PgAmbassadorRepo {
    async fn find_all(&self) -> Result<Vec<Ambassador>, CoreError> {
        let query = format!("SELECT {COLUMNS} FROM ambassadors ORDER BY created_at DESC, id DESC");
        let rows = sqlx::query_as::<_, AmbassadorRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("findAll ambassadors"))?;
        Ok(rows.into_iter().map(Ambassador::from).collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Ambassador>, CoreError> {
        let query = format!("SELECT {COLUMNS} FROM ambassadors WHERE id = $1");
        let row = sqlx::query_as::<_, AmbassadorRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("findById ambassador"))?;
        Ok(row.map(Ambassador::from))
    }

    async fn create(&self, input: &CreateAmbassador) -> Result<Ambassador, CoreError> {
        let query = format!(
            "INSERT INTO ambassadors (name, bio, image_url, year, age)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, AmbassadorRow>(&query)
            .bind(Json(&input.name))
            .bind(input.bio.as_ref().map(Json))
            .bind(&input.image_url)
            .bind(&input.year)
            .bind(input.age)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("create ambassador"))?;
        Ok(row.into())
    }

    async fn update(
        &self,
        id: DbId,
        input: &UpdateAmbassador,
    ) -> Result<Option<Ambassador>, CoreError> {
        let query = format!(
            "UPDATE ambassadors SET
                name = COALESCE($2, name),
                bio = COALESCE($3, bio),
                image_url = COALESCE($4, image_url),
                year = COALESCE($5, year),
                age = COALESCE($6, age)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, AmbassadorRow>(&query)
            .bind(id)
            .bind(input.name.as_ref().map(Json))
            .bind(input.bio.as_ref().map(Json))
            .bind(&input.image_url)
            .bind(&input.year)
            .bind(input.age)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("update ambassador"))?;
        Ok(row.map(Ambassador::from))
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        let result = sqlx::query("DELETE FROM ambassadors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("delete ambassador"))?;
        Ok(result.rows_affected() > 0)
    }
}

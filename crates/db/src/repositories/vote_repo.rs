//! Repository for the `votes` table.

use std::collections::HashMap;

use ambassadors_core::error::CoreError;
use ambassadors_core::types::DbId;
use async_trait::async_trait;
use sqlx::PgPool;

use super::{db_error, is_unique_violation, VoteRepository};
use crate::models::vote::{CreateVote, Vote};

const COLUMNS: &str = "id, project_id, voter_ip, created_at";

/// Message carried by the duplicate error when a voter repeats a vote.
pub const DUPLICATE_VOTE_MESSAGE: &str = "You have already voted for this project";

/// PostgreSQL-backed vote repository.
pub struct PgVoteRepo {
    pool: PgPool,
}

impl PgVoteRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VoteRepository for PgVoteRepo {
    async fn find_all(&self) -> Result<Vec<Vote>, CoreError> {
        let query = format!("SELECT {COLUMNS} FROM votes ORDER BY created_at DESC");
        sqlx::query_as::<_, Vote>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("findAll votes"))
    }

    async fn find_by_project(&self, project_id: DbId) -> Result<Vec<Vote>, CoreError> {
        let query =
            format!("SELECT {COLUMNS} FROM votes WHERE project_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Vote>(&query)
            .bind(project_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("findByProject votes"))
    }

    async fn count_by_project(&self) -> Result<HashMap<DbId, i64>, CoreError> {
        let rows: Vec<(DbId, i64)> =
            sqlx::query_as("SELECT project_id, COUNT(*) FROM votes GROUP BY project_id")
                .fetch_all(&self.pool)
                .await
                .map_err(db_error("countByProject votes"))?;
        Ok(rows.into_iter().collect())
    }

    async fn total_count(&self) -> Result<i64, CoreError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM votes")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("totalCount votes"))
    }

    async fn create(&self, input: &CreateVote) -> Result<Vote, CoreError> {
        let query = format!(
            "INSERT INTO votes (project_id, voter_ip)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vote>(&query)
            .bind(input.project_id)
            .bind(&input.voter_ip)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    tracing::debug!(project_id = %input.project_id, "Duplicate vote rejected by store");
                    CoreError::Duplicate {
                        resource: "vote",
                        message: DUPLICATE_VOTE_MESSAGE.to_string(),
                    }
                } else {
                    db_error("create vote")(err)
                }
            })
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        let result = sqlx::query("DELETE FROM votes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("delete vote"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn has_voted(&self, project_id: DbId, voter_ip: &str) -> Result<bool, CoreError> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM votes WHERE project_id = $1 AND voter_ip = $2)",
        )
        .bind(project_id)
        .bind(voter_ip)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("hasVoted vote"))
    }
}

//! In-process repository implementations.
//!
//! Same traits and error semantics as the PostgreSQL repositories, including
//! the `(project_id, voter_ip)` uniqueness rule on votes and the cascade from
//! projects to their votes. Used as test doubles and for running the API
//! without a database.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use ambassadors_core::error::CoreError;
use ambassadors_core::types::DbId;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::vote::{CreateVote, Vote};
use crate::models::Entity;
use crate::repositories::vote_repo::DUPLICATE_VOTE_MESSAGE;
use crate::repositories::{EntityRepository, VoteRepository};

/// Rows that belong to another entity and are removed with it, like a
/// foreign key with `ON DELETE CASCADE`.
#[async_trait]
pub trait CascadeDelete: Debug + Send + Sync {
    /// Remove every row owned by `owner`. Returns how many were removed.
    async fn delete_owned_by(&self, owner: DbId) -> usize;
}

/// In-memory [`EntityRepository`] for any catalog entity.
#[derive(Debug)]
pub struct InMemoryRepo<E> {
    rows: RwLock<Vec<E>>,
    cascades: Vec<Arc<dyn CascadeDelete>>,
}

impl<E: Entity> InMemoryRepo<E> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            cascades: Vec::new(),
        }
    }

    /// Remove `owned` rows whenever a row of this repository is deleted.
    pub fn cascade_to(mut self, owned: Arc<dyn CascadeDelete>) -> Self {
        self.cascades.push(owned);
        self
    }
}

impl<E: Entity> Default for InMemoryRepo<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> EntityRepository<E> for InMemoryRepo<E> {
    async fn find_all(&self) -> Result<Vec<E>, CoreError> {
        let mut rows = self.rows.read().await.clone();
        rows.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(rows)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<E>, CoreError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|row| row.id() == id).cloned())
    }

    async fn create(&self, input: &E::Create) -> Result<E, CoreError> {
        let row = E::from_create(Uuid::new_v4(), Utc::now(), input);
        self.rows.write().await.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: DbId, input: &E::Update) -> Result<Option<E>, CoreError> {
        let mut rows = self.rows.write().await;
        Ok(rows.iter_mut().find(|row| row.id() == id).map(|row| {
            row.apply_update(input);
            row.clone()
        }))
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        // Cascade under the write lock so no reader sees the owner gone but
        // its rows still present.
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| row.id() != id);
        let removed = rows.len() < before;
        if removed {
            for owned in &self.cascades {
                owned.delete_owned_by(id).await;
            }
        }
        Ok(removed)
    }
}

/// In-memory [`VoteRepository`] enforcing one vote per project and voter.
#[derive(Debug, Default)]
pub struct InMemoryVoteRepo {
    votes: RwLock<Vec<Vote>>,
}

impl InMemoryVoteRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all votes for `project_id`. Returns how many were removed.
    pub async fn delete_by_project(&self, project_id: DbId) -> usize {
        let mut votes = self.votes.write().await;
        let before = votes.len();
        votes.retain(|vote| vote.project_id != project_id);
        before - votes.len()
    }
}

#[async_trait]
impl CascadeDelete for InMemoryVoteRepo {
    async fn delete_owned_by(&self, owner: DbId) -> usize {
        self.delete_by_project(owner).await
    }
}

#[async_trait]
impl VoteRepository for InMemoryVoteRepo {
    async fn find_all(&self) -> Result<Vec<Vote>, CoreError> {
        Ok(self.votes.read().await.clone())
    }

    async fn find_by_project(&self, project_id: DbId) -> Result<Vec<Vote>, CoreError> {
        let votes = self.votes.read().await;
        Ok(votes
            .iter()
            .filter(|vote| vote.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn count_by_project(&self) -> Result<HashMap<DbId, i64>, CoreError> {
        let votes = self.votes.read().await;
        let mut counts = HashMap::new();
        for vote in votes.iter() {
            *counts.entry(vote.project_id).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn total_count(&self) -> Result<i64, CoreError> {
        Ok(self.votes.read().await.len() as i64)
    }

    async fn create(&self, input: &CreateVote) -> Result<Vote, CoreError> {
        // Check and insert under one write lock, like the store's constraint.
        let mut votes = self.votes.write().await;
        let duplicate = votes
            .iter()
            .any(|vote| vote.project_id == input.project_id && vote.voter_ip == input.voter_ip);
        if duplicate {
            return Err(CoreError::Duplicate {
                resource: "vote",
                message: DUPLICATE_VOTE_MESSAGE.to_string(),
            });
        }

        let vote = Vote {
            id: Uuid::new_v4(),
            project_id: input.project_id,
            voter_ip: input.voter_ip.clone(),
            created_at: Utc::now(),
        };
        votes.push(vote.clone());
        Ok(vote)
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        let mut votes = self.votes.write().await;
        let before = votes.len();
        votes.retain(|vote| vote.id != id);
        Ok(votes.len() < before)
    }

    async fn has_voted(&self, project_id: DbId, voter_ip: &str) -> Result<bool, CoreError> {
        let votes = self.votes.read().await;
        Ok(votes
            .iter()
            .any(|vote| vote.project_id == project_id && vote.voter_ip == voter_ip))
    }
}

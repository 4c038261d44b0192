//! Repository layer.
//!
//! Each entity has a trait describing its store operations and a PostgreSQL
//! implementation holding a `PgPool`. Store errors are translated here:
//! a missing row on a single-row lookup is `Ok(None)`, a unique violation on
//! votes is [`CoreError::Duplicate`], and anything else is
//! [`CoreError::Database`].

pub mod ambassador_repo;
pub mod project_repo;
pub mod teacher_repo;
pub mod vote_repo;

use std::collections::HashMap;
use std::sync::Arc;

use ambassadors_core::error::CoreError;
use ambassadors_core::types::DbId;
use async_trait::async_trait;

use crate::memory::{InMemoryRepo, InMemoryVoteRepo};
use crate::models::ambassador::Ambassador;
use crate::models::project::Project;
use crate::models::teacher::Teacher;
use crate::models::vote::{CreateVote, Vote};
use crate::models::Entity;
use crate::DbPool;

pub use ambassador_repo::PgAmbassadorRepo;
pub use project_repo::PgProjectRepo;
pub use teacher_repo::PgTeacherRepo;
pub use vote_repo::PgVoteRepo;

/// PostgreSQL `unique_violation`.
pub(crate) const UNIQUE_VIOLATION: &str = "23505";

/// CRUD operations shared by the catalog entities.
#[async_trait]
pub trait EntityRepository<E: Entity>: Send + Sync {
    /// All rows, newest first.
    async fn find_all(&self) -> Result<Vec<E>, CoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<E>, CoreError>;

    async fn create(&self, input: &E::Create) -> Result<E, CoreError>;

    /// Returns `None` if no row with the given `id` exists.
    async fn update(&self, id: DbId, input: &E::Update) -> Result<Option<E>, CoreError>;

    /// Returns `true` if a row was removed.
    async fn delete(&self, id: DbId) -> Result<bool, CoreError>;
}

/// Store operations on votes.
#[async_trait]
pub trait VoteRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Vote>, CoreError>;

    async fn find_by_project(&self, project_id: DbId) -> Result<Vec<Vote>, CoreError>;

    /// Vote counts keyed by project id. Projects without votes are absent.
    async fn count_by_project(&self) -> Result<HashMap<DbId, i64>, CoreError>;

    async fn total_count(&self) -> Result<i64, CoreError>;

    /// Record a vote. Fails with [`CoreError::Duplicate`] if this voter
    /// already voted for the project.
    async fn create(&self, input: &CreateVote) -> Result<Vote, CoreError>;

    async fn delete(&self, id: DbId) -> Result<bool, CoreError>;

    async fn has_voted(&self, project_id: DbId, voter_ip: &str) -> Result<bool, CoreError>;
}

/// The full set of repositories, injected into the service layer.
#[derive(Clone)]
pub struct Repositories {
    pub ambassadors: Arc<dyn EntityRepository<Ambassador>>,
    pub teachers: Arc<dyn EntityRepository<Teacher>>,
    pub projects: Arc<dyn EntityRepository<Project>>,
    pub votes: Arc<dyn VoteRepository>,
}

impl Repositories {
    pub fn postgres(pool: DbPool) -> Self {
        Self {
            ambassadors: Arc::new(PgAmbassadorRepo::new(pool.clone())),
            teachers: Arc::new(PgTeacherRepo::new(pool.clone())),
            projects: Arc::new(PgProjectRepo::new(pool.clone())),
            votes: Arc::new(PgVoteRepo::new(pool)),
        }
    }

    /// In-process repositories. Deleting a project also deletes its votes.
    pub fn in_memory() -> Self {
        let votes = Arc::new(InMemoryVoteRepo::new());
        Self {
            ambassadors: Arc::new(InMemoryRepo::<Ambassador>::new()),
            teachers: Arc::new(InMemoryRepo::<Teacher>::new()),
            projects: Arc::new(InMemoryRepo::<Project>::new().cascade_to(votes.clone())),
            votes,
        }
    }
}

/// Wrap a store error as a non-operational [`CoreError::Database`].
pub(crate) fn db_error(operation: &'static str) -> impl FnOnce(sqlx::Error) -> CoreError {
    move |err| CoreError::database(operation, err)
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION))
}

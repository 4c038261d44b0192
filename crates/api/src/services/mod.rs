//! Business logic over the injected repositories.
//!
//! Handlers call services; services call repository traits. Nothing here
//! depends on HTTP types, so every service is testable against in-memory
//! repositories.

pub mod catalog;
pub mod vote;

use std::sync::Arc;

use ambassadors_db::repositories::Repositories;

pub use catalog::{AmbassadorService, CatalogService, ProjectService, TeacherService};
pub use vote::{VoteOutcome, VoteService, VotingResults};

/// All services, cheaply cloneable for [`AppState`](crate::state::AppState).
#[derive(Clone)]
pub struct Services {
    pub ambassadors: Arc<AmbassadorService>,
    pub teachers: Arc<TeacherService>,
    pub projects: Arc<ProjectService>,
    pub votes: Arc<VoteService>,
}

impl Services {
    pub fn new(repositories: Repositories) -> Self {
        Self {
            ambassadors: Arc::new(CatalogService::new(repositories.ambassadors)),
            teachers: Arc::new(CatalogService::new(repositories.teachers)),
            projects: Arc::new(CatalogService::new(repositories.projects.clone())),
            votes: Arc::new(VoteService::new(repositories.votes, repositories.projects)),
        }
    }
}

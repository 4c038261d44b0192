//! Voting rules: one vote per project and client address, and the results
//! tally.

use std::collections::HashMap;
use std::sync::Arc;

use ambassadors_core::error::CoreError;
use ambassadors_core::types::DbId;
use ambassadors_core::validation::parse_id;
use ambassadors_db::models::project::{Project, ProjectWithVotes};
use ambassadors_db::models::vote::{CreateVote, Vote};
use ambassadors_db::repositories::vote_repo::DUPLICATE_VOTE_MESSAGE;
use ambassadors_db::repositories::{EntityRepository, VoteRepository};
use serde::Serialize;

pub const PROJECT_NOT_FOUND_MESSAGE: &str = "Project not found";

/// Result of a vote attempt that reached the store checks.
#[derive(Debug, Clone, PartialEq)]
pub enum VoteOutcome {
    Recorded(Vote),
    ProjectNotFound,
    AlreadyVoted,
}

impl VoteOutcome {
    /// Client-facing message for a rejected vote.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Recorded(_) => None,
            Self::ProjectNotFound => Some(PROJECT_NOT_FOUND_MESSAGE),
            Self::AlreadyVoted => Some(DUPLICATE_VOTE_MESSAGE),
        }
    }
}

/// Every project with its vote count, most votes first.
#[derive(Debug, Clone, Serialize)]
pub struct VotingResults {
    pub projects: Vec<ProjectWithVotes>,
    pub total_votes: i64,
}

pub struct VoteService {
    votes: Arc<dyn VoteRepository>,
    projects: Arc<dyn EntityRepository<Project>>,
}

impl VoteService {
    pub fn new(
        votes: Arc<dyn VoteRepository>,
        projects: Arc<dyn EntityRepository<Project>>,
    ) -> Self {
        Self { votes, projects }
    }

    /// Record a vote from `voter_ip` for `project_id`.
    ///
    /// Invalid input is an error; a missing project or a repeat vote is a
    /// non-success [`VoteOutcome`]. The uniqueness check is left to the
    /// store so concurrent duplicates cannot both succeed.
    pub async fn vote(&self, project_id: &str, voter_ip: &str) -> Result<VoteOutcome, CoreError> {
        let project_id = parse_id("projectId", project_id)?;
        let voter_ip = voter_ip.trim();
        if voter_ip.is_empty() {
            return Err(CoreError::invalid("voterIp", "Client address is required"));
        }

        if self.projects.find_by_id(project_id).await?.is_none() {
            tracing::debug!(%project_id, "Vote for unknown project");
            return Ok(VoteOutcome::ProjectNotFound);
        }

        let input = CreateVote {
            project_id,
            voter_ip: voter_ip.to_string(),
        };
        match self.votes.create(&input).await {
            Ok(vote) => Ok(VoteOutcome::Recorded(vote)),
            Err(CoreError::Duplicate { .. }) => Ok(VoteOutcome::AlreadyVoted),
            Err(err) => Err(err),
        }
    }

    /// All projects with their vote counts.
    ///
    /// The stored vote total is read alongside the counts; a mismatch means
    /// vote rows exist for projects that are no longer listed.
    pub async fn results(&self) -> Result<VotingResults, CoreError> {
        let (projects, counts, stored_total) = tokio::try_join!(
            self.projects.find_all(),
            self.votes.count_by_project(),
            self.votes.total_count(),
        )?;
        let results = tally(projects, &counts);
        if results.total_votes != stored_total {
            tracing::warn!(
                listed = results.total_votes,
                stored = stored_total,
                "Vote rows without a listed project"
            );
        }
        Ok(results)
    }

    /// Every stored vote, for moderation.
    pub async fn list(&self) -> Result<Vec<Vote>, CoreError> {
        self.votes.find_all().await
    }

    pub async fn has_voted(&self, project_id: &str, voter_ip: &str) -> Result<bool, CoreError> {
        let project_id = parse_id("projectId", project_id)?;
        self.votes.has_voted(project_id, voter_ip.trim()).await
    }

    pub async fn vote_count_for_project(&self, project_id: DbId) -> Result<i64, CoreError> {
        if self.projects.find_by_id(project_id).await?.is_none() {
            return Err(CoreError::not_found("Project", project_id));
        }
        let votes = self.votes.find_by_project(project_id).await?;
        Ok(votes.len() as i64)
    }

    /// Remove a single vote.
    pub async fn delete(&self, id: DbId) -> Result<(), CoreError> {
        if !self.votes.delete(id).await? {
            return Err(CoreError::not_found("Vote", id));
        }
        tracing::info!(%id, "Vote deleted");
        Ok(())
    }
}

/// Attach counts to projects and order them by count, then id.
fn tally(projects: Vec<Project>, counts: &HashMap<DbId, i64>) -> VotingResults {
    let mut projects: Vec<ProjectWithVotes> = projects
        .into_iter()
        .map(|project| {
            let vote_count = counts.get(&project.id).copied().unwrap_or(0);
            ProjectWithVotes {
                project,
                vote_count,
            }
        })
        .collect();

    projects.sort_by(|a, b| {
        b.vote_count
            .cmp(&a.vote_count)
            .then_with(|| a.project.id.cmp(&b.project.id))
    });

    let total_votes = projects.iter().map(|p| p.vote_count).sum();
    VotingResults {
        projects,
        total_votes,
    }
}

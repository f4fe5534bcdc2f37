//! GitHub activity data source
//!
//! The scoring pipeline only sees the [`ActivityDataSource`] trait. The
//! [`GithubClient`] implementation talks to GitHub's REST API for profiles
//! and commit samples, and to its GraphQL API for search counts and the
//! contribution graph.
//!
//! # Environment Variables
//!
//! - `GITHUB_TOKEN`: access token used by the CLI (`read:user`, `repo`)
//!
//! # Example
//!
//! ```rust,ignore
//! use devmeter::github::{ActivityDataSource, GithubClient};
//!
//! let client = GithubClient::new(config.github.clone(), token);
//! let profile = client.fetch_profile("octocat")?;
//! ```

mod client;
mod graphql;

pub use client::GithubClient;
pub use graphql::{authored_prs_query, merged_prs_query, reviewed_prs_query};

use crate::models::{ContributionCalendar, RepoContributions, RepositoryNode, UserProfile};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur talking to GitHub
#[derive(Error, Debug)]
pub enum GithubError {
    #[error("Missing GitHub token: set GITHUB_TOKEN or [github] token in the user config")]
    MissingToken,

    #[error("GitHub API error: {status} - {message}")]
    Http { status: u16, message: String },

    #[error("GitHub request failed: {0}")]
    Transport(String),

    #[error("Failed to parse GitHub response: {0}")]
    Parse(String),

    #[error("GitHub GraphQL errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    #[error("GitHub user not found: {0}")]
    NotFound(String),
}

impl GithubError {
    /// The token was rejected (no valid session)
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, GithubError::Http { status: 401, .. })
    }
}

pub type GithubResult<T> = Result<T, GithubError>;

/// Repositories plus per-repository contribution breakdowns and the
/// contribution calendar, from one combined query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContributionGraph {
    pub repositories: Vec<RepositoryNode>,
    pub commit_contributions: Vec<RepoContributions>,
    pub pull_request_contributions: Vec<RepoContributions>,
    pub review_contributions: Vec<RepoContributions>,
    pub issue_contributions: Vec<RepoContributions>,
    pub calendar: Option<ContributionCalendar>,
}

/// Source of raw activity for one user
pub trait ActivityDataSource: Send + Sync {
    /// Login of the user owning the token
    fn authenticated_login(&self) -> GithubResult<String>;

    /// Public profile (stable id, creation date)
    fn fetch_profile(&self, username: &str) -> GithubResult<UserProfile>;

    /// Total hits for an issue/PR search query
    fn search_issue_count(&self, query: &str) -> GithubResult<u64>;

    /// Repositories and contributions since `from`
    fn fetch_contribution_graph(
        &self,
        username: &str,
        from: DateTime<Utc>,
    ) -> GithubResult<ContributionGraph>;

    /// Commits returned by one page (up to 100) of a repository's history
    fn count_recent_commits(&self, owner: &str, repo: &str) -> GithubResult<u64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_detection() {
        let err = GithubError::Http {
            status: 401,
            message: "Bad credentials".to_string(),
        };
        assert!(err.is_unauthorized());
        assert!(!GithubError::Transport("timeout".to_string()).is_unauthorized());
    }

    #[test]
    fn test_graphql_error_display() {
        let err = GithubError::GraphQl(vec!["first".to_string(), "second".to_string()]);
        assert_eq!(err.to_string(), "GitHub GraphQL errors: first; second");
    }
}

//! Shared fixtures for integration tests

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use devmeter::github::{ActivityDataSource, ContributionGraph, GithubError, GithubResult};
use devmeter::models::{
    ContributionCalendar, ContributionDay, DevMeterResult, RepoContributions, RepositoryNode,
    UserProfile,
};
use devmeter::store::{MetricsStore, StoreError, StoreResult};
use std::sync::Mutex;

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

pub fn profile() -> UserProfile {
    UserProfile {
        id: "583231".to_string(),
        login: "octocat".to_string(),
        name: Some("The Octocat".to_string()),
        avatar_url: None,
        email: None,
        created_at: Utc.with_ymd_and_hms(2011, 1, 25, 18, 44, 36).unwrap(),
    }
}

/// Two repositories, balanced contribution types, 500 stars
pub fn graph() -> ContributionGraph {
    ContributionGraph {
        repositories: vec![
            RepositoryNode {
                name: "api".to_string(),
                owner_login: "octocat".to_string(),
                stargazer_count: 300,
            },
            RepositoryNode {
                name: "web".to_string(),
                owner_login: "octocat".to_string(),
                stargazer_count: 200,
            },
        ],
        commit_contributions: vec![
            RepoContributions::new("api", 20).with_language("Rust"),
            RepoContributions::new("web", 20).with_language("TypeScript"),
        ],
        pull_request_contributions: vec![
            RepoContributions::new("api", 20),
            RepoContributions::new("web", 20),
        ],
        review_contributions: vec![RepoContributions::new("api", 40)],
        issue_contributions: vec![RepoContributions::new("web", 40)],
        calendar: Some(ContributionCalendar {
            total_contributions: 1560,
            days: (1..=3)
                .map(|d| ContributionDay {
                    date: chrono::NaiveDate::from_ymd_opt(2024, 3, d).unwrap(),
                    count: 520,
                })
                .collect(),
        }),
    }
}

/// Scripted data source
pub struct FakeSource {
    pub login: String,
    pub profile: Option<UserProfile>,
    pub pull_requests: u64,
    pub merged_pull_requests: u64,
    pub reviews: u64,
    pub graph: Option<ContributionGraph>,
    pub commits: Option<u64>,
    pub reject_token: bool,
    pub queries: Mutex<Vec<String>>,
}

impl Default for FakeSource {
    fn default() -> Self {
        Self {
            login: "octocat".to_string(),
            profile: Some(profile()),
            pull_requests: 40,
            merged_pull_requests: 30,
            reviews: 100,
            graph: Some(graph()),
            commits: Some(12),
            reject_token: false,
            queries: Mutex::new(Vec::new()),
        }
    }
}

fn bad_credentials() -> GithubError {
    GithubError::Http {
        status: 401,
        message: "Bad credentials".to_string(),
    }
}

impl ActivityDataSource for FakeSource {
    fn authenticated_login(&self) -> GithubResult<String> {
        if self.reject_token {
            return Err(bad_credentials());
        }
        Ok(self.login.clone())
    }

    fn fetch_profile(&self, username: &str) -> GithubResult<UserProfile> {
        if self.reject_token {
            return Err(bad_credentials());
        }
        self.profile
            .clone()
            .ok_or_else(|| GithubError::NotFound(username.to_string()))
    }

    fn search_issue_count(&self, query: &str) -> GithubResult<u64> {
        self.queries.lock().unwrap().push(query.to_string());
        if query.contains("is:merged") {
            Ok(self.merged_pull_requests)
        } else if query.starts_with("reviewed-by:") {
            Ok(self.reviews)
        } else {
            Ok(self.pull_requests)
        }
    }

    fn fetch_contribution_graph(
        &self,
        _username: &str,
        _from: DateTime<Utc>,
    ) -> GithubResult<ContributionGraph> {
        self.graph
            .clone()
            .ok_or_else(|| GithubError::GraphQl(vec!["Something went wrong".to_string()]))
    }

    fn count_recent_commits(&self, _owner: &str, _repo: &str) -> GithubResult<u64> {
        self.commits
            .ok_or_else(|| GithubError::Transport("connection reset".to_string()))
    }
}

/// Store whose writes always fail
pub struct FailingStore;

impl MetricsStore for FailingStore {
    fn upsert_user(&self, _profile: &UserProfile) -> StoreResult<UserProfile> {
        Err(StoreError::Io(std::io::Error::other("disk full")))
    }

    fn get_user(&self, _user_id: &str) -> StoreResult<Option<UserProfile>> {
        Ok(None)
    }

    fn upsert(&self, _user_id: &str, _result: &DevMeterResult) -> StoreResult<DevMeterResult> {
        Err(StoreError::Io(std::io::Error::other("disk full")))
    }

    fn get(&self, _user_id: &str) -> StoreResult<Option<DevMeterResult>> {
        Ok(None)
    }

    fn list(&self) -> StoreResult<Vec<DevMeterResult>> {
        Ok(Vec::new())
    }
}

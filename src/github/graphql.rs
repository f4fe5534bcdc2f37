//! GraphQL queries and response shapes for the GitHub v4 API

use super::{ContributionGraph, GithubError, GithubResult};
use crate::models::{ContributionCalendar, ContributionDay, RepoContributions, RepositoryNode};
use chrono::NaiveDate;
use serde::Deserialize;

/// Search query for PRs authored by `username`
pub fn authored_prs_query(username: &str) -> String {
    format!("author:{} type:pr", username)
}

/// Search query for merged PRs authored by `username`
pub fn merged_prs_query(username: &str) -> String {
    format!("author:{} type:pr is:merged", username)
}

/// Search query for PRs reviewed by `username`
pub fn reviewed_prs_query(username: &str) -> String {
    format!("reviewed-by:{} type:pr", username)
}

pub(super) const SEARCH_COUNT_QUERY: &str = r#"
query ($query: String!) {
  search(query: $query, type: ISSUE, first: 1) {
    issueCount
  }
}
"#;

pub(super) const CONTRIBUTION_GRAPH_QUERY: &str = r#"
query ($username: String!, $fromDate: DateTime!) {
  user(login: $username) {
    repositories(first: 100, ownerAffiliations: [OWNER, COLLABORATOR]) {
      totalCount
      nodes {
        name
        owner { login }
        stargazerCount
      }
    }
    contributionsCollection(from: $fromDate) {
      commitContributionsByRepository(maxRepositories: 100) {
        repository { name primaryLanguage { name } }
        contributions { totalCount }
      }
      pullRequestContributionsByRepository(maxRepositories: 100) {
        repository { name }
        contributions { totalCount }
      }
      pullRequestReviewContributionsByRepository(maxRepositories: 100) {
        repository { name }
        contributions { totalCount }
      }
      issueContributionsByRepository(maxRepositories: 100) {
        repository { name }
        contributions { totalCount }
      }
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays { date contributionCount }
        }
      }
    }
  }
}
"#;

/// `{ data, errors }` wrapper around every GraphQL response
#[derive(Deserialize)]
pub(super) struct GraphQlEnvelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlErrorMessage>,
}

#[derive(Deserialize)]
struct GraphQlErrorMessage {
    message: String,
}

impl<T> GraphQlEnvelope<T> {
    /// Data if the response carried no errors
    pub(super) fn into_result(self) -> GithubResult<T> {
        if !self.errors.is_empty() {
            return Err(GithubError::GraphQl(
                self.errors.into_iter().map(|e| e.message).collect(),
            ));
        }
        self.data
            .ok_or_else(|| GithubError::Parse("GraphQL response has no data".to_string()))
    }
}

#[derive(Deserialize)]
pub(super) struct SearchData {
    search: SearchCount,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchCount {
    issue_count: u64,
}

impl SearchData {
    pub(super) fn issue_count(&self) -> u64 {
        self.search.issue_count
    }
}

#[derive(Deserialize)]
pub(super) struct ContributionGraphData {
    user: Option<UserNode>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserNode {
    repositories: RepositoryConnection,
    contributions_collection: ContributionsCollection,
}

#[derive(Deserialize)]
struct RepositoryConnection {
    #[serde(default)]
    nodes: Vec<Option<RepositoryJson>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryJson {
    name: String,
    owner: OwnerJson,
    #[serde(default)]
    stargazer_count: u64,
}

#[derive(Deserialize)]
struct OwnerJson {
    login: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection {
    #[serde(default)]
    commit_contributions_by_repository: Vec<RepoContributionJson>,
    #[serde(default)]
    pull_request_contributions_by_repository: Vec<RepoContributionJson>,
    #[serde(default)]
    pull_request_review_contributions_by_repository: Vec<RepoContributionJson>,
    #[serde(default)]
    issue_contributions_by_repository: Vec<RepoContributionJson>,
    contribution_calendar: Option<CalendarJson>,
}

#[derive(Deserialize)]
struct RepoContributionJson {
    repository: RepoRefJson,
    contributions: TotalCountJson,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepoRefJson {
    name: String,
    #[serde(default)]
    primary_language: Option<LanguageJson>,
}

#[derive(Deserialize)]
struct LanguageJson {
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TotalCountJson {
    total_count: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarJson {
    total_contributions: u64,
    #[serde(default)]
    weeks: Vec<WeekJson>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WeekJson {
    #[serde(default)]
    contribution_days: Vec<DayJson>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DayJson {
    date: NaiveDate,
    contribution_count: u64,
}

impl From<RepoContributionJson> for RepoContributions {
    fn from(json: RepoContributionJson) -> Self {
        RepoContributions {
            repo_name: json.repository.name,
            primary_language: json.repository.primary_language.map(|l| l.name),
            contribution_count: json.contributions.total_count,
        }
    }
}

fn convert_all(items: Vec<RepoContributionJson>) -> Vec<RepoContributions> {
    items.into_iter().map(RepoContributions::from).collect()
}

impl ContributionGraphData {
    /// Flatten into the domain shape. A null `user` means the login doesn't exist.
    pub(super) fn into_graph(self, username: &str) -> GithubResult<ContributionGraph> {
        let user = self
            .user
            .ok_or_else(|| GithubError::NotFound(username.to_string()))?;

        let repositories = user
            .repositories
            .nodes
            .into_iter()
            .flatten()
            .map(|r| RepositoryNode {
                name: r.name,
                owner_login: r.owner.login,
                stargazer_count: r.stargazer_count,
            })
            .collect();

        let collection = user.contributions_collection;
        let calendar = collection.contribution_calendar.map(|c| ContributionCalendar {
            total_contributions: c.total_contributions,
            days: c
                .weeks
                .into_iter()
                .flat_map(|w| w.contribution_days)
                .map(|d| ContributionDay {
                    date: d.date,
                    count: d.contribution_count,
                })
                .collect(),
        });

        Ok(ContributionGraph {
            repositories,
            commit_contributions: convert_all(collection.commit_contributions_by_repository),
            pull_request_contributions: convert_all(
                collection.pull_request_contributions_by_repository,
            ),
            review_contributions: convert_all(
                collection.pull_request_review_contributions_by_repository,
            ),
            issue_contributions: convert_all(collection.issue_contributions_by_repository),
            calendar,
        })
    }
}

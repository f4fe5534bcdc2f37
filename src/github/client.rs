//! GitHub API client (REST + GraphQL)
//!
//! Uses ureq (sync HTTP). The server runs it on blocking threads.

use super::graphql::{
    ContributionGraphData, GraphQlEnvelope, SearchData, CONTRIBUTION_GRAPH_QUERY,
    SEARCH_COUNT_QUERY,
};
use super::{ActivityDataSource, ContributionGraph, GithubError, GithubResult};
use crate::config::GithubConfig;
use crate::models::UserProfile;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Commits per page when sampling a repository's history
const COMMIT_SAMPLE_PAGE_SIZE: &str = "100";

/// GitHub client bound to one access token
pub struct GithubClient {
    config: GithubConfig,
    token: String,
    agent: ureq::Agent,
}

fn make_agent(timeout_secs: u64) -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false) // Status codes are mapped to GithubError below
        .timeout_global(Some(std::time::Duration::from_secs(timeout_secs)))
        .build()
        .new_agent()
}

impl GithubClient {
    pub fn new(config: GithubConfig, token: impl Into<String>) -> Self {
        let agent = make_agent(config.timeout_secs);
        Self {
            config,
            token: token.into(),
            agent,
        }
    }

    /// Client for a token that may be absent or blank
    pub fn with_token(config: GithubConfig, token: Option<&str>) -> GithubResult<Self> {
        match token.map(str::trim).filter(|t| !t.is_empty()) {
            Some(token) => Ok(Self::new(config, token)),
            None => Err(GithubError::MissingToken),
        }
    }

    fn rest_url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url.trim_end_matches('/'), path)
    }

    /// GET a REST endpoint and decode the JSON body
    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> GithubResult<T> {
        let url = self.rest_url(path);
        debug!("GET {}", url);

        let mut req = self
            .agent
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", &self.config.user_agent)
            .header("Authorization", &format!("Bearer {}", self.token));
        for (key, value) in query {
            req = req.query(*key, *value);
        }

        let response = req
            .call()
            .map_err(|e| GithubError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        if status == 404 {
            return Err(GithubError::NotFound(path.to_string()));
        }
        if status >= 400 {
            let message = response.into_body().read_to_string().unwrap_or_default();
            return Err(GithubError::Http { status, message });
        }

        response
            .into_body()
            .read_json()
            .map_err(|e| GithubError::Parse(e.to_string()))
    }

    /// POST a GraphQL query and unwrap the `{ data, errors }` envelope
    fn graphql<T: DeserializeOwned>(&self, query: &str, variables: serde_json::Value) -> GithubResult<T> {
        let body = GraphQlRequest { query, variables };

        let response = self
            .agent
            .post(&self.config.graphql_url)
            .header("Content-Type", "application/json")
            .header("User-Agent", &self.config.user_agent)
            .header("Authorization", &format!("Bearer {}", self.token))
            .send_json(&body)
            .map_err(|e| GithubError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        if status >= 400 {
            let message = response.into_body().read_to_string().unwrap_or_default();
            return Err(GithubError::Http { status, message });
        }

        let envelope: GraphQlEnvelope<T> = response
            .into_body()
            .read_json()
            .map_err(|e| GithubError::Parse(e.to_string()))?;
        envelope.into_result()
    }
}

impl ActivityDataSource for GithubClient {
    fn authenticated_login(&self) -> GithubResult<String> {
        let user: AuthenticatedUserJson = self.get_json("/user", &[])?;
        Ok(user.login)
    }

    fn fetch_profile(&self, username: &str) -> GithubResult<UserProfile> {
        let user: ProfileJson = self.get_json(&format!("/users/{}", username), &[])?;
        Ok(UserProfile {
            id: user.id.to_string(),
            login: user.login,
            name: user.name,
            avatar_url: user.avatar_url,
            email: user.email,
            created_at: user.created_at,
        })
    }

    fn search_issue_count(&self, query: &str) -> GithubResult<u64> {
        let data: SearchData =
            self.graphql(SEARCH_COUNT_QUERY, serde_json::json!({ "query": query }))?;
        Ok(data.issue_count())
    }

    fn fetch_contribution_graph(
        &self,
        username: &str,
        from: DateTime<Utc>,
    ) -> GithubResult<ContributionGraph> {
        let variables = serde_json::json!({
            "username": username,
            "fromDate": from.to_rfc3339_opts(SecondsFormat::Secs, true),
        });
        let data: ContributionGraphData = self.graphql(CONTRIBUTION_GRAPH_QUERY, variables)?;
        data.into_graph(username)
    }

    fn count_recent_commits(&self, owner: &str, repo: &str) -> GithubResult<u64> {
        let commits: Vec<serde_json::Value> = self.get_json(
            &format!("/repos/{}/{}/commits", owner, repo),
            &[("per_page", COMMIT_SAMPLE_PAGE_SIZE)],
        )?;
        Ok(commits.len() as u64)
    }
}

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: serde_json::Value,
}

#[derive(Deserialize)]
struct AuthenticatedUserJson {
    login: String,
}

#[derive(Deserialize)]
struct ProfileJson {
    id: u64,
    login: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    avatar_url: Option<String>,
    #[serde(default)]
    email: Option<String>,
    created_at: DateTime<Utc>,
}

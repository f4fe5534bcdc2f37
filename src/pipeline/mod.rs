//! Metrics refresh pipeline
//!
//! Orchestrates one refresh for one user:
//! 1. Fetch the profile (stable id, account creation date) and store it
//! 2. Fetch activity (PR/review search counts and the contribution graph)
//! 3. Sample commits from the first repository
//! 4. Score everything into a [`DevMeterResult`]
//! 5. Upsert the result keyed by the user's id
//!
//! Activity and sampling failures degrade to zeroed data so a user with a
//! flaky or empty account still gets a record. Profile and store failures
//! abort the refresh.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::ScoringConfig;
use crate::github::{
    authored_prs_query, merged_prs_query, reviewed_prs_query, ActivityDataSource, GithubError,
    GithubResult,
};
use crate::models::{
    activity_window_start, CommitSample, DevMeterResult, RawActivitySnapshot, UserProfile,
};
use crate::scoring::{
    compute_code_quality, compute_community_impact, compute_productivity, compute_seniority,
    compute_versatility, compute_weighted_dev_meter, review_to_pr_ratio, SubScores,
};
use crate::store::{MetricsStore, StoreError};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to fetch profile for {username}: {source}")]
    Profile {
        username: String,
        #[source]
        source: GithubError,
    },

    #[error("Failed to store metrics: {0}")]
    Persistence(#[from] StoreError),
}

impl PipelineError {
    /// The access token was rejected while fetching the profile
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, PipelineError::Profile { source, .. } if source.is_unauthorized())
    }
}

/// Refresh pipeline over a data source and a store
pub struct MetricsPipeline<'a> {
    source: &'a dyn ActivityDataSource,
    store: &'a dyn MetricsStore,
    scoring: &'a ScoringConfig,
}

impl<'a> MetricsPipeline<'a> {
    pub fn new(
        source: &'a dyn ActivityDataSource,
        store: &'a dyn MetricsStore,
        scoring: &'a ScoringConfig,
    ) -> Self {
        Self {
            source,
            store,
            scoring,
        }
    }

    /// Refresh metrics for `username` as of now
    pub fn refresh(&self, username: &str) -> Result<DevMeterResult, PipelineError> {
        self.refresh_at(username, Utc::now())
    }

    /// Refresh metrics for `username` as of `now`, returning the stored record
    pub fn refresh_at(
        &self,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<DevMeterResult, PipelineError> {
        let profile = self
            .source
            .fetch_profile(username)
            .map_err(|source| PipelineError::Profile {
                username: username.to_string(),
                source,
            })?;
        debug!("Resolved {} to user id {}", profile.login, profile.id);
        self.store.upsert_user(&profile)?;

        let snapshot = self.collect_snapshot(&profile, now);
        info!(
            "Found {} repositories, {} PRs ({} merged), {} reviews for {}",
            snapshot.repositories.len(),
            snapshot.pull_request_count,
            snapshot.merged_pull_request_count,
            snapshot.review_count,
            profile.login
        );

        let sample = self.sample_commits(&snapshot);
        let result = assemble_result(&profile, &snapshot, &sample, now, self.scoring);

        let stored = self.store.upsert(&profile.id, &result)?;
        info!(
            "DevMeter score for {}: {} ({})",
            stored.username, stored.dev_meter_score, stored.dev_meter_tier
        );
        Ok(stored)
    }

    /// Activity snapshot, or a zeroed one if any part of the fetch fails
    fn collect_snapshot(&self, profile: &UserProfile, now: DateTime<Utc>) -> RawActivitySnapshot {
        match self.fetch_activity(profile, now) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(
                    "Activity fetch failed for {}, scoring with zeroed activity: {}",
                    profile.login, e
                );
                RawActivitySnapshot::zeroed(profile.created_at)
            }
        }
    }

    fn fetch_activity(
        &self,
        profile: &UserProfile,
        now: DateTime<Utc>,
    ) -> GithubResult<RawActivitySnapshot> {
        let login = profile.login.as_str();
        let pull_request_count = self.source.search_issue_count(&authored_prs_query(login))?;
        let merged_pull_request_count = self.source.search_issue_count(&merged_prs_query(login))?;
        let review_count = self.source.search_issue_count(&reviewed_prs_query(login))?;
        let graph = self
            .source
            .fetch_contribution_graph(login, activity_window_start(now))?;

        Ok(RawActivitySnapshot {
            account_created_at: profile.created_at,
            pull_request_count,
            merged_pull_request_count,
            review_count,
            repositories: graph.repositories,
            commit_contributions_by_repository: graph.commit_contributions,
            pull_request_contributions_by_repository: graph.pull_request_contributions,
            review_contributions_by_repository: graph.review_contributions,
            issue_contributions_by_repository: graph.issue_contributions,
            contribution_calendar: graph.calendar,
        })
    }

    /// Commit count from the first repository (zero without repositories)
    fn sample_commits(&self, snapshot: &RawActivitySnapshot) -> CommitSample {
        let Some(repo) = snapshot.repositories.first() else {
            return CommitSample::default();
        };

        match self.source.count_recent_commits(&repo.owner_login, &repo.name) {
            Ok(count) => CommitSample::new(repo.name.clone(), count),
            Err(e) => {
                warn!("Commit sampling failed for {}/{}: {}", repo.owner_login, repo.name, e);
                CommitSample::default()
            }
        }
    }
}

/// Score a snapshot into a full metrics record. Pure: no I/O.
pub fn assemble_result(
    profile: &UserProfile,
    snapshot: &RawActivitySnapshot,
    sample: &CommitSample,
    now: DateTime<Utc>,
    scoring: &ScoringConfig,
) -> DevMeterResult {
    let ratio = review_to_pr_ratio(snapshot.review_count, snapshot.pull_request_count);
    let account_age_in_years = snapshot.account_age_years(now);
    let seniority_score = compute_seniority(ratio, snapshot.review_count, account_age_in_years);

    let versatility = compute_versatility(snapshot);
    let productivity = compute_productivity(snapshot.contribution_calendar.as_ref());
    let code_quality = compute_code_quality(
        snapshot.pull_request_count,
        snapshot.merged_pull_request_count,
        scoring.average_pr_revisions,
    );
    let community = compute_community_impact(&snapshot.repositories);

    let composite = compute_weighted_dev_meter(
        &SubScores {
            seniority: seniority_score,
            versatility: versatility.score,
            productivity: productivity.score,
            code_quality: code_quality.score,
            community_impact: community.score,
        },
        &scoring.weights,
    );

    DevMeterResult {
        user_github_id: profile.id.clone(),
        username: profile.login.clone(),
        last_calculated: now,

        commit_frequency: sample.commit_count,
        lines_of_code_added: sample.estimated_lines_added(),
        lines_of_code_deleted: sample.estimated_lines_deleted(),
        average_commit_size: sample.average_commit_size(),
        repositories_analyzed: snapshot.repository_names(),
        date_range_start: activity_window_start(now),
        date_range_end: now,

        review_to_pr_ratio: ratio,
        review_count: snapshot.review_count,
        account_age_in_years,
        seniority_score,

        language_diversity: versatility.language_diversity,
        contribution_type_diversity: versatility.contribution_type_diversity,
        repository_diversity: versatility.repository_diversity,
        versatility_score: versatility.score,
        languages: versatility.languages,

        contribution_frequency: productivity.contribution_frequency,
        active_days: productivity.active_days,
        productivity_score: productivity.score,

        pr_merge_ratio: code_quality.pr_merge_ratio,
        pr_revisions: code_quality.pr_revisions,
        code_quality_score: code_quality.score,

        star_count: community.star_count,
        community_impact_score: community.score,

        dev_meter_score: composite.dev_meter_score,
        dev_meter_tier: composite.dev_meter_tier,
    }
}

//! Core data models for DevMeter
//!
//! Raw activity pulled from the source platform, and the scored record
//! that gets persisted and rendered.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Length of the activity window, in days
pub const ACTIVITY_WINDOW_DAYS: i64 = 365;

/// Days per year used for account age (accounts for leap years)
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Start of the activity window ending at `now`
pub fn activity_window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(ACTIVITY_WINDOW_DAYS)
}

/// Public profile of a platform user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Stable platform identifier (the store key)
    pub id: String,
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A repository the user owns or collaborates on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryNode {
    pub name: String,
    #[serde(default)]
    pub owner_login: String,
    #[serde(default)]
    pub stargazer_count: u64,
}

/// Contribution count for one repository and one contribution type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RepoContributions {
    pub repo_name: String,
    #[serde(default)]
    pub primary_language: Option<String>,
    #[serde(default)]
    pub contribution_count: u64,
}

impl RepoContributions {
    pub fn new(repo_name: impl Into<String>, contribution_count: u64) -> Self {
        Self {
            repo_name: repo_name.into(),
            primary_language: None,
            contribution_count,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.primary_language = Some(language.into());
        self
    }
}

/// Sum contribution counts across repositories
pub fn total_contributions(contributions: &[RepoContributions]) -> u64 {
    contributions.iter().map(|c| c.contribution_count).sum()
}

/// One day of the contribution calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub count: u64,
}

/// Contribution calendar covering the activity window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
    pub total_contributions: u64,
    #[serde(default)]
    pub days: Vec<ContributionDay>,
}

impl ContributionCalendar {
    /// Days with at least one contribution
    pub fn active_days(&self) -> usize {
        self.days.iter().filter(|d| d.count > 0).count()
    }
}

/// Everything fetched about a user before scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawActivitySnapshot {
    pub account_created_at: DateTime<Utc>,
    #[serde(default)]
    pub pull_request_count: u64,
    #[serde(default)]
    pub merged_pull_request_count: u64,
    #[serde(default)]
    pub review_count: u64,
    #[serde(default)]
    pub repositories: Vec<RepositoryNode>,
    #[serde(default)]
    pub commit_contributions_by_repository: Vec<RepoContributions>,
    #[serde(default)]
    pub pull_request_contributions_by_repository: Vec<RepoContributions>,
    #[serde(default)]
    pub review_contributions_by_repository: Vec<RepoContributions>,
    #[serde(default)]
    pub issue_contributions_by_repository: Vec<RepoContributions>,
    #[serde(default)]
    pub contribution_calendar: Option<ContributionCalendar>,
}

impl RawActivitySnapshot {
    /// Snapshot with no activity at all. Used when the activity fetch fails.
    pub fn zeroed(account_created_at: DateTime<Utc>) -> Self {
        Self {
            account_created_at,
            pull_request_count: 0,
            merged_pull_request_count: 0,
            review_count: 0,
            repositories: Vec::new(),
            commit_contributions_by_repository: Vec::new(),
            pull_request_contributions_by_repository: Vec::new(),
            review_contributions_by_repository: Vec::new(),
            issue_contributions_by_repository: Vec::new(),
            contribution_calendar: Some(ContributionCalendar::default()),
        }
    }

    /// Account age in fractional years at `now`, never negative
    pub fn account_age_years(&self, now: DateTime<Utc>) -> f64 {
        let seconds = (now - self.account_created_at).num_seconds().max(0) as f64;
        seconds / (DAYS_PER_YEAR * 24.0 * 60.0 * 60.0)
    }

    /// Names of all fetched repositories, in fetch order
    pub fn repository_names(&self) -> Vec<String> {
        self.repositories.iter().map(|r| r.name.clone()).collect()
    }
}

/// Commit count sampled from a single representative repository.
///
/// Line counts are fixed multiples of the commit count. This is a coarse
/// estimate, not a diff scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitSample {
    pub repository: Option<String>,
    pub commit_count: u64,
}

impl CommitSample {
    pub const ESTIMATED_LINES_ADDED_PER_COMMIT: u64 = 100;
    pub const ESTIMATED_LINES_DELETED_PER_COMMIT: u64 = 30;

    pub fn new(repository: impl Into<String>, commit_count: u64) -> Self {
        Self {
            repository: Some(repository.into()),
            commit_count,
        }
    }

    pub fn estimated_lines_added(&self) -> u64 {
        self.commit_count * Self::ESTIMATED_LINES_ADDED_PER_COMMIT
    }

    pub fn estimated_lines_deleted(&self) -> u64 {
        self.commit_count * Self::ESTIMATED_LINES_DELETED_PER_COMMIT
    }

    pub fn average_commit_size(&self) -> f64 {
        let added = self.estimated_lines_added();
        if added > 0 && self.commit_count > 0 {
            added as f64 / self.commit_count as f64
        } else {
            0.0
        }
    }
}

/// Discrete label bucketing the composite score
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum DevMeterTier {
    #[default]
    Amateur,
    Novice,
    Adept,
    Elite,
    Master,
    Cracked,
}

impl DevMeterTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            DevMeterTier::Amateur => "Amateur",
            DevMeterTier::Novice => "Novice",
            DevMeterTier::Adept => "Adept",
            DevMeterTier::Elite => "Elite",
            DevMeterTier::Master => "Master",
            DevMeterTier::Cracked => "Cracked",
        }
    }
}

impl std::fmt::Display for DevMeterTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The persisted and rendered metrics record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevMeterResult {
    pub user_github_id: String,
    #[serde(default)]
    pub username: String,
    pub last_calculated: DateTime<Utc>,

    // Sampled from one repository (coarse estimate)
    pub commit_frequency: u64,
    pub lines_of_code_added: u64,
    pub lines_of_code_deleted: u64,
    pub average_commit_size: f64,
    pub repositories_analyzed: Vec<String>,
    pub date_range_start: DateTime<Utc>,
    pub date_range_end: DateTime<Utc>,

    // Seniority
    #[serde(rename = "reviewToPRRatio")]
    pub review_to_pr_ratio: f64,
    pub review_count: u64,
    pub account_age_in_years: f64,
    pub seniority_score: u8,

    // Versatility
    pub language_diversity: f64,
    pub contribution_type_diversity: f64,
    pub repository_diversity: f64,
    pub versatility_score: u8,
    pub languages: Vec<String>,

    // Productivity
    pub contribution_frequency: f64,
    pub active_days: u32,
    pub productivity_score: u8,

    // Code quality
    pub pr_merge_ratio: f64,
    pub pr_revisions: f64,
    pub code_quality_score: u8,

    // Community impact
    pub star_count: u64,
    pub community_impact_score: u8,

    pub dev_meter_score: u8,
    pub dev_meter_tier: DevMeterTier,
}

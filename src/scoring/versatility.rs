//! Versatility sub-score: languages, contribution types, repositories

use super::{saturate, shannon_diversity_index, to_score};
use crate::models::{total_contributions, RawActivitySnapshot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const LANGUAGE_SATURATION: f64 = 10.0;

const LANGUAGE_WEIGHT: f64 = 40.0;
const CONTRIBUTION_TYPE_WEIGHT: f64 = 30.0;
const REPOSITORY_WEIGHT: f64 = 30.0;

/// Versatility raw metrics plus score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VersatilityMetrics {
    /// Distinct languages / 10, capped at 1. A saturating count, not entropy.
    pub language_diversity: f64,
    /// Entropy over [commits, PRs, reviews, issues]
    pub contribution_type_diversity: f64,
    /// Entropy over per-repository PR contributions
    pub repository_diversity: f64,
    pub score: u8,
    /// Distinct primary languages, in first-seen order
    pub languages: Vec<String>,
}

pub fn compute_versatility(snapshot: &RawActivitySnapshot) -> VersatilityMetrics {
    let languages = distinct_languages(snapshot);
    let language_diversity = saturate(languages.len() as f64, LANGUAGE_SATURATION);

    let type_counts = [
        total_contributions(&snapshot.commit_contributions_by_repository),
        total_contributions(&snapshot.pull_request_contributions_by_repository),
        total_contributions(&snapshot.review_contributions_by_repository),
        total_contributions(&snapshot.issue_contributions_by_repository),
    ];
    let contribution_type_diversity = shannon_diversity_index(&type_counts);

    // PR contributions only, summed per repository name. Ordered so the
    // entropy sum is accumulated the same way on every call.
    let mut per_repo: BTreeMap<&str, u64> = BTreeMap::new();
    for contribution in &snapshot.pull_request_contributions_by_repository {
        *per_repo.entry(contribution.repo_name.as_str()).or_insert(0) +=
            contribution.contribution_count;
    }
    let repo_counts: Vec<u64> = per_repo.into_values().collect();
    let repository_diversity = shannon_diversity_index(&repo_counts);

    let score = to_score(
        language_diversity * LANGUAGE_WEIGHT
            + contribution_type_diversity * CONTRIBUTION_TYPE_WEIGHT
            + repository_diversity * REPOSITORY_WEIGHT,
    );

    VersatilityMetrics {
        language_diversity,
        contribution_type_diversity,
        repository_diversity,
        score,
        languages,
    }
}

/// Primary languages of repositories with commit contributions.
/// Repositories without a primary language are ignored.
fn distinct_languages(snapshot: &RawActivitySnapshot) -> Vec<String> {
    let mut languages: Vec<String> = Vec::new();
    for contribution in &snapshot.commit_contributions_by_repository {
        let Some(language) = contribution.primary_language.as_deref() else {
            continue;
        };
        if language.is_empty() || languages.iter().any(|l| l == language) {
            continue;
        }
        languages.push(language.to_string());
    }
    languages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RepoContributions;
    use chrono::{TimeZone, Utc};

    const EPS: f64 = 1e-9;

    fn empty_snapshot() -> RawActivitySnapshot {
        RawActivitySnapshot::zeroed(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap())
    }

    #[test]
    fn test_no_activity() {
        let metrics = compute_versatility(&empty_snapshot());
        assert_eq!(metrics.score, 0);
        assert!(metrics.languages.is_empty());
        assert_eq!(metrics.contribution_type_diversity, 0.0);
        assert_eq!(metrics.repository_diversity, 0.0);
    }

    #[test]
    fn test_languages_are_distinct_and_skip_missing() {
        let mut snapshot = empty_snapshot();
        snapshot.commit_contributions_by_repository = vec![
            RepoContributions::new("api", 10).with_language("Rust"),
            RepoContributions::new("web", 4).with_language("TypeScript"),
            RepoContributions::new("cli", 2).with_language("Rust"),
            RepoContributions::new("notes", 8),
        ];
        let metrics = compute_versatility(&snapshot);
        assert_eq!(metrics.languages, vec!["Rust", "TypeScript"]);
        assert!((metrics.language_diversity - 0.2).abs() < EPS);
    }

    #[test]
    fn test_language_diversity_saturates() {
        let mut snapshot = empty_snapshot();
        snapshot.commit_contributions_by_repository = (0..14)
            .map(|i| RepoContributions::new(format!("repo{}", i), 1).with_language(format!("Lang{}", i)))
            .collect();
        let metrics = compute_versatility(&snapshot);
        assert_eq!(metrics.languages.len(), 14);
        assert_eq!(metrics.language_diversity, 1.0);
    }

    #[test]
    fn test_balanced_contribution_types() {
        let mut snapshot = empty_snapshot();
        snapshot.commit_contributions_by_repository = vec![RepoContributions::new("a", 6)];
        snapshot.pull_request_contributions_by_repository = vec![RepoContributions::new("a", 6)];
        snapshot.review_contributions_by_repository = vec![RepoContributions::new("b", 6)];
        snapshot.issue_contributions_by_repository = vec![
            RepoContributions::new("a", 3),
            RepoContributions::new("b", 3),
        ];
        let metrics = compute_versatility(&snapshot);
        assert!((metrics.contribution_type_diversity - 1.0).abs() < EPS);
        // Single PR repository: no repository diversity
        assert_eq!(metrics.repository_diversity, 0.0);
        assert_eq!(metrics.score, 30);
    }

    #[test]
    fn test_repository_diversity_groups_by_name() {
        let mut snapshot = empty_snapshot();
        snapshot.pull_request_contributions_by_repository = vec![
            RepoContributions::new("a", 2),
            RepoContributions::new("b", 4),
            RepoContributions::new("a", 2),
        ];
        let metrics = compute_versatility(&snapshot);
        // a=4, b=4 after grouping
        assert!((metrics.repository_diversity - 1.0).abs() < EPS);
    }

    #[test]
    fn test_repository_diversity_ignores_commits() {
        let mut snapshot = empty_snapshot();
        snapshot.commit_contributions_by_repository = vec![
            RepoContributions::new("a", 10),
            RepoContributions::new("b", 10),
        ];
        let metrics = compute_versatility(&snapshot);
        assert_eq!(metrics.repository_diversity, 0.0);
    }

    #[test]
    fn test_idempotent() {
        let mut snapshot = empty_snapshot();
        snapshot.commit_contributions_by_repository = vec![
            RepoContributions::new("api", 7).with_language("Rust"),
            RepoContributions::new("web", 3).with_language("Go"),
        ];
        snapshot.pull_request_contributions_by_repository = (0..12)
            .map(|i| RepoContributions::new(format!("repo{}", i), i + 1))
            .collect();
        snapshot.issue_contributions_by_repository = vec![RepoContributions::new("web", 5)];
        assert_eq!(compute_versatility(&snapshot), compute_versatility(&snapshot));
    }
}

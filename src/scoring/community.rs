//! Community impact sub-score from repository stars

use super::{saturate, to_score};
use crate::models::RepositoryNode;
use serde::{Deserialize, Serialize};

const STAR_SATURATION: f64 = 500.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CommunityImpactMetrics {
    pub star_count: u64,
    pub score: u8,
}

/// Community impact: total stars across repositories, saturating at 500
pub fn compute_community_impact(repositories: &[RepositoryNode]) -> CommunityImpactMetrics {
    let star_count: u64 = repositories.iter().map(|r| r.stargazer_count).sum();
    let score = to_score(saturate(star_count as f64, STAR_SATURATION) * 100.0);
    CommunityImpactMetrics { star_count, score }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(stars: u64) -> RepositoryNode {
        RepositoryNode {
            name: format!("repo-{}", stars),
            owner_login: "octocat".to_string(),
            stargazer_count: stars,
        }
    }

    #[test]
    fn test_saturates_at_500() {
        let metrics = compute_community_impact(&[repo(250), repo(250)]);
        assert_eq!(metrics.star_count, 500);
        assert_eq!(metrics.score, 100);

        let metrics = compute_community_impact(&[repo(9_000)]);
        assert_eq!(metrics.score, 100);
    }

    #[test]
    fn test_partial_and_empty() {
        assert_eq!(compute_community_impact(&[repo(125)]).score, 25);
        assert_eq!(compute_community_impact(&[]), CommunityImpactMetrics::default());
    }

    #[test]
    fn test_idempotent() {
        let repos = [repo(12), repo(340), repo(7)];
        assert_eq!(compute_community_impact(&repos), compute_community_impact(&repos));
    }
}

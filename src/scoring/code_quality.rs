//! Code quality sub-score from pull request outcomes

use super::to_score;
use serde::{Deserialize, Serialize};

/// Revisions per PR that still earn full credit
const TARGET_REVISIONS: f64 = 2.0;

const MERGE_RATIO_WEIGHT: f64 = 40.0;
const REVISIONS_WEIGHT: f64 = 60.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CodeQualityMetrics {
    /// Merged / authored PRs, 0 without PRs
    pub pr_merge_ratio: f64,
    /// Average revisions per PR that was scored
    pub pr_revisions: f64,
    pub score: u8,
}

/// Code quality score. Fewer revisions per PR is better: 2 or fewer
/// earns full credit.
///
/// `average_pr_revisions` should be positive. A non-positive or NaN value
/// is treated as full credit, matching `min(1, 2 / 0) = 1`.
pub fn compute_code_quality(
    total_prs: u64,
    merged_prs: u64,
    average_pr_revisions: f64,
) -> CodeQualityMetrics {
    let pr_merge_ratio = if total_prs > 0 {
        merged_prs as f64 / total_prs as f64
    } else {
        0.0
    };

    let normalized_revisions = if average_pr_revisions > 0.0 {
        (TARGET_REVISIONS / average_pr_revisions).min(1.0)
    } else {
        1.0
    };

    let score = to_score(pr_merge_ratio * MERGE_RATIO_WEIGHT + normalized_revisions * REVISIONS_WEIGHT);

    CodeQualityMetrics {
        pr_merge_ratio,
        pr_revisions: average_pr_revisions,
        score,
    }
}

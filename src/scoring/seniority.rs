//! Seniority sub-score: review habits and account tenure

use super::{saturate, to_score};

const RATIO_SATURATION: f64 = 3.0;
const REVIEW_SATURATION: f64 = 100.0;
const AGE_SATURATION_YEARS: f64 = 10.0;

const RATIO_WEIGHT: f64 = 40.0;
const REVIEW_WEIGHT: f64 = 30.0;
const AGE_WEIGHT: f64 = 30.0;

/// Reviews per authored PR, 0 when there are no PRs
pub fn review_to_pr_ratio(review_count: u64, pr_count: u64) -> f64 {
    if pr_count > 0 {
        review_count as f64 / pr_count as f64
    } else {
        0.0
    }
}

/// Seniority score in [0, 100].
///
/// Each component saturates (ratio 3, 100 reviews, 10 years) so no single
/// factor dominates.
pub fn compute_seniority(review_to_pr_ratio: f64, review_count: u64, account_age_years: f64) -> u8 {
    let ratio = saturate(review_to_pr_ratio, RATIO_SATURATION) * RATIO_WEIGHT;
    let reviews = saturate(review_count as f64, REVIEW_SATURATION) * REVIEW_WEIGHT;
    let age = saturate(account_age_years, AGE_SATURATION_YEARS) * AGE_WEIGHT;
    to_score(ratio + reviews + age)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_inputs() {
        assert_eq!(compute_seniority(0.0, 0, 0.0), 0);
    }

    #[test]
    fn test_all_components_saturate() {
        assert_eq!(compute_seniority(3.0, 100, 10.0), 100);
        assert_eq!(compute_seniority(12.0, 5_000, 25.0), 100);
    }

    #[test]
    fn test_half_way() {
        assert_eq!(compute_seniority(1.5, 50, 5.0), 50);
    }

    #[test]
    fn test_ratio_guards_zero_prs() {
        assert_eq!(review_to_pr_ratio(40, 0), 0.0);
        assert_eq!(review_to_pr_ratio(40, 20), 2.0);
        // No PRs: only reviews and age contribute
        let score = compute_seniority(review_to_pr_ratio(100, 0), 100, 10.0);
        assert_eq!(score, 60);
    }

    #[test]
    fn test_monotonic_in_each_input() {
        let base = compute_seniority(1.0, 20, 2.0);
        assert!(compute_seniority(2.0, 20, 2.0) >= base);
        assert!(compute_seniority(1.0, 40, 2.0) >= base);
        assert!(compute_seniority(1.0, 20, 4.0) >= base);
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(
            compute_seniority(0.7, 33, 3.3),
            compute_seniority(0.7, 33, 3.3)
        );
    }
}

//! Productivity sub-score from the contribution calendar

use super::{saturate, to_score};
use crate::models::{ContributionCalendar, ACTIVITY_WINDOW_DAYS};
use serde::{Deserialize, Serialize};

const WEEKS_PER_YEAR: f64 = 52.0;
const FREQUENCY_SATURATION: f64 = 30.0;

const FREQUENCY_WEIGHT: f64 = 50.0;
const ACTIVE_DAYS_WEIGHT: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductivityMetrics {
    /// Contributions per week over the window
    pub contribution_frequency: f64,
    /// Days with at least one contribution
    pub active_days: u32,
    pub score: u8,
}

/// Productivity score. Without calendar data both raw metrics are 0.
pub fn compute_productivity(calendar: Option<&ContributionCalendar>) -> ProductivityMetrics {
    let (contribution_frequency, active_days) = match calendar {
        Some(calendar) => (
            calendar.total_contributions as f64 / WEEKS_PER_YEAR,
            u32::try_from(calendar.active_days()).unwrap_or(u32::MAX),
        ),
        None => (0.0, 0),
    };

    let score = to_score(
        saturate(contribution_frequency, FREQUENCY_SATURATION) * FREQUENCY_WEIGHT
            + saturate(f64::from(active_days), ACTIVITY_WINDOW_DAYS as f64) * ACTIVE_DAYS_WEIGHT,
    );

    ProductivityMetrics {
        contribution_frequency,
        active_days,
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContributionDay;
    use chrono::{Duration, NaiveDate};

    fn calendar(total: u64, active: usize, span: usize) -> ContributionCalendar {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let days = (0..span)
            .map(|i| ContributionDay {
                date: start + Duration::days(i as i64),
                count: if i < active { 1 } else { 0 },
            })
            .collect();
        ContributionCalendar {
            total_contributions: total,
            days,
        }
    }

    #[test]
    fn test_missing_calendar() {
        let metrics = compute_productivity(None);
        assert_eq!(metrics.contribution_frequency, 0.0);
        assert_eq!(metrics.active_days, 0);
        assert_eq!(metrics.score, 0);
    }

    #[test]
    fn test_saturated_calendar() {
        let cal = calendar(30 * 52, 365, 365);
        let metrics = compute_productivity(Some(&cal));
        assert_eq!(metrics.contribution_frequency, 30.0);
        assert_eq!(metrics.active_days, 365);
        assert_eq!(metrics.score, 100);
    }

    #[test]
    fn test_partial_calendar() {
        // 15/week -> 25 points, 73 active days -> 10 points
        let cal = calendar(15 * 52, 73, 365);
        let metrics = compute_productivity(Some(&cal));
        assert_eq!(metrics.active_days, 73);
        assert_eq!(metrics.score, 35);
    }

    #[test]
    fn test_more_activity_never_scores_lower() {
        let low = compute_productivity(Some(&calendar(100, 20, 365)));
        let high = compute_productivity(Some(&calendar(200, 40, 365)));
        assert!(high.score >= low.score);
    }

    #[test]
    fn test_idempotent() {
        let cal = calendar(640, 117, 365);
        assert_eq!(compute_productivity(Some(&cal)), compute_productivity(Some(&cal)));
    }
}

//! DevMeter Scoring System
//!
//! Pure functions that turn raw activity into five normalized sub-scores
//! and one weighted composite. Nothing here does I/O or keeps state; every
//! call recomputes from its inputs.
//!
//! # Scoring Formula
//!
//! ```text
//! DevMeter = Seniority × 0.15 + Productivity × 0.25 + CodeQuality × 0.30
//!          + Versatility × 0.20 + CommunityImpact × 0.10
//!
//! Where each sub-score is a rounded 0-100 sum of saturating terms:
//!   term = min(raw / saturation_point, 1) × term_weight
//! ```
//!
//! # Sub-scores
//!
//! - **Seniority**: review/PR ratio (sat. 3, ×40), reviews (sat. 100, ×30),
//!   account age (sat. 10 years, ×30)
//! - **Versatility**: distinct languages (sat. 10, ×40), contribution-type
//!   diversity (×30), repository diversity (×30)
//! - **Productivity**: contributions per week (sat. 30, ×50), active days
//!   (sat. 365, ×50)
//! - **Code Quality**: PR merge ratio (×40), min(1, 2 / avg revisions) (×60)
//! - **Community Impact**: total stars (sat. 500, ×100)
//!
//! # Tiers
//!
//! | Score  | Tier    |
//! |--------|---------|
//! | 91-100 | Cracked |
//! | 81-90  | Master  |
//! | 61-80  | Elite   |
//! | 41-60  | Adept   |
//! | 21-40  | Novice  |
//! | 0-20   | Amateur |

mod code_quality;
mod community;
mod composite;
mod diversity;
mod productivity;
mod seniority;
mod versatility;

pub use code_quality::{compute_code_quality, CodeQualityMetrics};
pub use community::{compute_community_impact, CommunityImpactMetrics};
pub use composite::{compute_dev_meter, compute_weighted_dev_meter, DevMeterScore, SubScores};
pub use diversity::shannon_diversity_index;
pub use productivity::{compute_productivity, ProductivityMetrics};
pub use seniority::{compute_seniority, review_to_pr_ratio};
pub use versatility::{compute_versatility, VersatilityMetrics};

/// Normalize `value` against a saturation point into [0, 1].
///
/// NaN and negative inputs count as zero.
pub(crate) fn saturate(value: f64, saturation: f64) -> f64 {
    if value.is_nan() || saturation <= 0.0 {
        return 0.0;
    }
    (value / saturation).clamp(0.0, 1.0)
}

/// Round a weighted sum to an integer score in [0, 100]
pub(crate) fn to_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

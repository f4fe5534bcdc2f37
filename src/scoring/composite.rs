//! Weighted DevMeter composite and tier classification

use super::to_score;
use crate::config::CompositeWeights;
use crate::models::DevMeterTier;
use serde::{Deserialize, Serialize};

/// The five sub-scores feeding the composite. Absent scores are 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SubScores {
    #[serde(default)]
    pub seniority: u8,
    #[serde(default)]
    pub versatility: u8,
    #[serde(default)]
    pub productivity: u8,
    #[serde(default)]
    pub code_quality: u8,
    #[serde(default)]
    pub community_impact: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevMeterScore {
    pub dev_meter_score: u8,
    pub dev_meter_tier: DevMeterTier,
}

impl DevMeterTier {
    /// Tier for a composite score (inclusive lower bounds, highest first)
    pub fn from_score(score: u8) -> Self {
        match score {
            91.. => DevMeterTier::Cracked,
            81..=90 => DevMeterTier::Master,
            61..=80 => DevMeterTier::Elite,
            41..=60 => DevMeterTier::Adept,
            21..=40 => DevMeterTier::Novice,
            _ => DevMeterTier::Amateur,
        }
    }
}

/// Composite score using the standard weights
pub fn compute_dev_meter(scores: &SubScores) -> DevMeterScore {
    compute_weighted_dev_meter(scores, &CompositeWeights::default())
}

/// Composite score with explicit weights
pub fn compute_weighted_dev_meter(scores: &SubScores, weights: &CompositeWeights) -> DevMeterScore {
    let weighted = f64::from(scores.seniority) * weights.seniority
        + f64::from(scores.productivity) * weights.productivity
        + f64::from(scores.code_quality) * weights.code_quality
        + f64::from(scores.versatility) * weights.versatility
        + f64::from(scores.community_impact) * weights.community_impact;

    let dev_meter_score = to_score(weighted);
    DevMeterScore {
        dev_meter_score,
        dev_meter_tier: DevMeterTier::from_score(dev_meter_score),
    }
}

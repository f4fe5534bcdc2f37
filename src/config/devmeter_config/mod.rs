//! Project-level configuration support
//!
//! Loads configuration from `devmeter.toml` or `.devmeterrc.json` in the
//! working directory, or from an explicit `--config` path.
//!
//! # Configuration Format
//!
//! ```toml
//! # devmeter.toml
//!
//! [github]
//! api_url = "https://api.github.com"
//! graphql_url = "https://api.github.com/graphql"
//! timeout_secs = 30
//!
//! [scoring]
//! average_pr_revisions = 1.5
//! weights = { seniority = 0.15, productivity = 0.25, code_quality = 0.30, versatility = 0.20, community_impact = 0.10 }
//!
//! [store]
//! path = "~/.local/share/devmeter/metrics.redb"
//!
//! [server]
//! bind = "127.0.0.1"
//! port = 3000
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Revisions per PR assumed when no review-cycle data is available
pub const DEFAULT_AVERAGE_PR_REVISIONS: f64 = 1.5;

/// Top-level configuration loaded from devmeter.toml or similar
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DevMeterConfig {
    /// GitHub API endpoints
    #[serde(default)]
    pub github: GithubConfig,

    /// Scoring inputs and composite weights
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Metrics store location
    #[serde(default)]
    pub store: StoreConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
}

impl DevMeterConfig {
    /// Repair values the scoring engine cannot use
    pub fn sanitize(&mut self) {
        self.scoring.sanitize();
    }
}

/// GitHub REST and GraphQL endpoints
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GithubConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_graphql_url")]
    pub graphql_url: String,

    /// GitHub rejects requests without a User-Agent
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Global timeout per request, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            graphql_url: default_graphql_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}
fn default_graphql_url() -> String {
    "https://api.github.com/graphql".to_string()
}
fn default_user_agent() -> String {
    format!("devmeter/{}", env!("CARGO_PKG_VERSION"))
}
fn default_timeout_secs() -> u64 {
    30
}

/// Scoring configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScoringConfig {
    /// Average revisions per PR fed to the code quality score.
    /// Real review-cycle data is not fetched, so this is an external input.
    #[serde(default = "default_average_pr_revisions")]
    pub average_pr_revisions: f64,

    /// Weights for the composite (must sum to 1.0)
    #[serde(default)]
    pub weights: CompositeWeights,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            average_pr_revisions: default_average_pr_revisions(),
            weights: CompositeWeights::default(),
        }
    }
}

fn default_average_pr_revisions() -> f64 {
    DEFAULT_AVERAGE_PR_REVISIONS
}

impl ScoringConfig {
    /// Reset a non-positive revisions input and normalize weights that
    /// don't sum to 1.0
    pub fn sanitize(&mut self) {
        if !(self.average_pr_revisions > 0.0 && self.average_pr_revisions.is_finite()) {
            warn!(
                "average_pr_revisions must be positive (got {}), using {}",
                self.average_pr_revisions, DEFAULT_AVERAGE_PR_REVISIONS
            );
            self.average_pr_revisions = DEFAULT_AVERAGE_PR_REVISIONS;
        }

        if !self.weights.is_valid() {
            warn!("Composite weights do not sum to 1.0, normalizing");
            self.weights.normalize();
            if !self.weights.is_valid() {
                self.weights = CompositeWeights::default();
            }
        }
    }
}

/// Weights for the five sub-scores in the composite
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct CompositeWeights {
    #[serde(default = "default_seniority_weight")]
    pub seniority: f64,

    #[serde(default = "default_productivity_weight")]
    pub productivity: f64,

    #[serde(default = "default_code_quality_weight")]
    pub code_quality: f64,

    #[serde(default = "default_versatility_weight")]
    pub versatility: f64,

    #[serde(default = "default_community_impact_weight")]
    pub community_impact: f64,
}

impl Default for CompositeWeights {
    fn default() -> Self {
        Self {
            seniority: default_seniority_weight(),
            productivity: default_productivity_weight(),
            code_quality: default_code_quality_weight(),
            versatility: default_versatility_weight(),
            community_impact: default_community_impact_weight(),
        }
    }
}

fn default_seniority_weight() -> f64 {
    0.15
}
fn default_productivity_weight() -> f64 {
    0.25
}
fn default_code_quality_weight() -> f64 {
    0.30
}
fn default_versatility_weight() -> f64 {
    0.20
}
fn default_community_impact_weight() -> f64 {
    0.10
}

impl CompositeWeights {
    fn sum(&self) -> f64 {
        self.seniority + self.productivity + self.code_quality + self.versatility + self.community_impact
    }

    fn all_non_negative(&self) -> bool {
        [
            self.seniority,
            self.productivity,
            self.code_quality,
            self.versatility,
            self.community_impact,
        ]
        .iter()
        .all(|w| *w >= 0.0)
    }

    /// Validate that weights are non-negative and sum to 1.0 (with tolerance)
    pub fn is_valid(&self) -> bool {
        self.all_non_negative() && (self.sum() - 1.0).abs() < 0.001
    }

    /// Normalize weights to sum to 1.0
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum > 0.0 && self.all_non_negative() {
            self.seniority /= sum;
            self.productivity /= sum;
            self.code_quality /= sum;
            self.versatility /= sum;
            self.community_impact /= sum;
        }
    }
}

/// Metrics store location
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct StoreConfig {
    /// Path to the redb file (default: platform data dir)
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StoreConfig {
    /// Configured path with `~/` expanded, or the default location
    pub fn resolved_path(&self) -> PathBuf {
        match &self.path {
            Some(path) => expand_home(path),
            None => default_store_path(),
        }
    }
}

/// Default store file: `<data dir>/devmeter/metrics.redb`
pub fn default_store_path() -> PathBuf {
    let base = dirs::data_dir().unwrap_or_else(|| {
        // Fallback to ~/.local/share
        dirs::home_dir()
            .map(|h| h.join(".local").join("share"))
            .unwrap_or_else(|| PathBuf::from("."))
    });
    base.join("devmeter").join("metrics.redb")
}

fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    3000
}

/// Load configuration from a directory.
///
/// Searches for configuration files in this order:
/// 1. `devmeter.toml`
/// 2. `.devmeterrc.json`
///
/// Returns default configuration if no config file is found or it fails
/// to parse.
pub fn load_config(dir: &Path) -> DevMeterConfig {
    for name in ["devmeter.toml", ".devmeterrc.json"] {
        let path = dir.join(name);
        if !path.exists() {
            continue;
        }
        match load_config_file(&path) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
            }
        }
    }

    debug!("No config found, using defaults");
    DevMeterConfig::default()
}

/// Load configuration from an explicit file (TOML, or JSON by extension)
pub fn load_config_file(path: &Path) -> anyhow::Result<DevMeterConfig> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let mut config: DevMeterConfig = if is_json {
        serde_json::from_str(&content)?
    } else {
        toml::from_str(&content)?
    };
    config.sanitize();
    Ok(config)
}

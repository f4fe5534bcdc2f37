//! Configuration module for DevMeter
//!
//! This module handles:
//! - Project-level configuration (devmeter.toml)
//! - Scoring weights and the PR revisions input
//! - GitHub endpoints, store location, server bind address
//! - User-level config and the GitHub token (user_config)

mod devmeter_config;
mod user_config;

pub use devmeter_config::{
    default_store_path,
    load_config,
    load_config_file,
    CompositeWeights,
    DevMeterConfig,
    GithubConfig,
    ScoringConfig,
    ServerConfig,
    StoreConfig,
    DEFAULT_AVERAGE_PR_REVISIONS,
};
pub use user_config::UserConfig;

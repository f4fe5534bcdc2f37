//! User-level configuration for devmeter
//!
//! Supports loading config from:
//! - Environment variables
//! - ~/.config/devmeter/config.toml

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Environment variable holding the GitHub access token
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UserConfig {
    #[serde(default)]
    pub github: GithubCredentials,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GithubCredentials {
    /// Access token with `read:user` and `repo` scopes
    pub token: Option<String>,

    /// Login to refresh when none is given on the command line
    pub username: Option<String>,
}

impl UserConfig {
    /// Credentials from the user config file, then `GITHUB_TOKEN` on top.
    /// An unreadable or malformed file is logged and skipped.
    pub fn load() -> Result<Self> {
        let mut config = match Self::user_config_path().filter(|p| p.exists()) {
            Some(path) => Self::load_file(&path).unwrap_or_else(|e| {
                warn!("Ignoring user config {}: {}", path.display(), e);
                UserConfig::default()
            }),
            None => UserConfig::default(),
        };
        config.apply_env(std::env::var(TOKEN_ENV).ok());
        Ok(config)
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config = UserConfig::default();
        config.merge(toml::from_str(&content)?);
        Ok(config)
    }

    /// A non-blank token from the environment replaces the file's token
    fn apply_env(&mut self, token: Option<String>) {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.github.token = Some(token);
        }
    }

    /// Get the user config directory path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("devmeter").join("config.toml"))
    }

    /// Merge another config into this one (other takes priority)
    fn merge(&mut self, other: UserConfig) {
        if other.github.token.is_some() {
            self.github.token = other.github.token;
        }
        if other.github.username.is_some() {
            self.github.username = other.github.username;
        }
    }

    /// Get the GitHub token, if configured
    pub fn github_token(&self) -> Option<&str> {
        self.github.token.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Default login to refresh, if configured
    pub fn default_username(&self) -> Option<&str> {
        self.github.username.as_deref()
    }

    /// Initialize user config directory and create example config
    pub fn init_user_config() -> Result<PathBuf> {
        let config_path = Self::user_config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        if !config_path.exists() {
            let example = r#"# DevMeter User Configuration

[github]
# Personal access token (read:user, repo). GITHUB_TOKEN overrides this.
# token = "ghp_..."

# Login used by `devmeter refresh` when none is given
# username = "octocat"
"#;
            std::fs::write(&config_path, example)?;
        }

        Ok(config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = UserConfig::default();
        assert!(config.github_token().is_none());
        assert!(config.default_username().is_none());
    }

    #[test]
    fn test_toml_parsing() {
        let toml_str = r#"
[github]
token = "ghp_test123"
username = "octocat"
"#;
        let config: UserConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.github_token(), Some("ghp_test123"));
        assert_eq!(config.default_username(), Some("octocat"));
    }

    #[test]
    fn test_blank_token_is_ignored() {
        let config: UserConfig = toml::from_str("[github]\ntoken = \"  \"\n").unwrap();
        assert!(config.github_token().is_none());
    }

    #[test]
    fn test_merge_overrides_set_fields() {
        let mut base = UserConfig {
            github: GithubCredentials {
                token: Some("old".to_string()),
                username: Some("alice".to_string()),
            },
        };
        let other = UserConfig {
            github: GithubCredentials {
                token: Some("new".to_string()),
                username: None,
            },
        };
        base.merge(other);
        assert_eq!(base.github_token(), Some("new"));
        assert_eq!(base.default_username(), Some("alice"));
    }

    #[test]
    fn test_env_token_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[github]\ntoken = \"from-file\"\nusername = \"octocat\"\n").unwrap();

        let mut config = UserConfig::load_file(&path).unwrap();
        assert_eq!(config.github_token(), Some("from-file"));

        config.apply_env(Some("   ".to_string()));
        assert_eq!(config.github_token(), Some("from-file"));

        config.apply_env(Some("from-env".to_string()));
        assert_eq!(config.github_token(), Some("from-env"));
        assert_eq!(config.default_username(), Some("octocat"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is [[ not valid toml").unwrap();
        assert!(UserConfig::load_file(&path).is_err());
    }

    #[test]
    fn test_user_config_path_returns_some() {
        if let Some(p) = UserConfig::user_config_path() {
            assert!(p.ends_with("devmeter/config.toml"));
        }
    }
}

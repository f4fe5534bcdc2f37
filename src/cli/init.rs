//! Init command - write example configuration files

use anyhow::{Context as _, Result};
use console::style;
use std::path::Path;

use crate::config::UserConfig;

const PROJECT_CONFIG: &str = r#"# DevMeter Configuration

[github]
api_url = "https://api.github.com"
graphql_url = "https://api.github.com/graphql"
timeout_secs = 30

[scoring]
# Revisions per PR assumed by the code quality score (must be positive)
average_pr_revisions = 1.5

# Composite weights (must sum to 1.0)
[scoring.weights]
seniority = 0.15
productivity = 0.25
code_quality = 0.30
versatility = 0.20
community_impact = 0.10

[store]
# path = "~/.local/share/devmeter/metrics.redb"

[server]
bind = "127.0.0.1"
port = 3000
"#;

/// Run the init command
pub fn run(dir: &Path) -> Result<()> {
    println!("\n{} Initializing DevMeter\n", style("›").bold());

    let config_path = dir.join("devmeter.toml");
    if config_path.exists() {
        println!(
            "{} Already exists: {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
    } else {
        std::fs::write(&config_path, PROJECT_CONFIG)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        println!(
            "{} Created {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
    }

    let user_path = UserConfig::init_user_config()?;
    println!(
        "{} User config at {}",
        style("✓").green(),
        style(user_path.display()).cyan()
    );
    println!("\nSet GITHUB_TOKEN or edit the user config, then run `devmeter refresh`.");
    Ok(())
}

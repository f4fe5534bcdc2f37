//! Refresh command - fetch, score and store metrics for one user

use anyhow::{Context as _, Result};
use console::style;

use super::Context;
use crate::config::UserConfig;
use crate::github::{ActivityDataSource, GithubClient};
use crate::pipeline::MetricsPipeline;
use crate::reporters::{report_with_format, OutputFormat};

pub fn run(ctx: &Context, username: Option<&str>, format: OutputFormat) -> Result<()> {
    let user_config = UserConfig::load()?;
    let client = GithubClient::with_token(ctx.config.github.clone(), user_config.github_token())?;

    let login = match username.or(user_config.default_username()) {
        Some(login) => login.to_string(),
        None => client
            .authenticated_login()
            .context("No username given and the token owner could not be resolved")?,
    };

    let store = ctx.open_store()?;
    if format == OutputFormat::Text {
        eprintln!("{} Refreshing metrics for {}", style("›").cyan(), style(&login).bold());
    }

    let result = MetricsPipeline::new(&client, store.as_ref(), &ctx.config.scoring).refresh(&login)?;
    println!("{}", report_with_format(&result, format)?);
    Ok(())
}

//! Score command - score a saved activity snapshot offline

use anyhow::{Context as _, Result};
use chrono::Utc;
use std::path::Path;

use super::Context;
use crate::models::{CommitSample, RawActivitySnapshot, UserProfile};
use crate::pipeline::assemble_result;
use crate::reporters::{report_with_format, OutputFormat};

pub fn run(
    ctx: &Context,
    snapshot_path: &Path,
    username: &str,
    commits: u64,
    format: OutputFormat,
) -> Result<()> {
    let content = std::fs::read_to_string(snapshot_path)
        .with_context(|| format!("Failed to read {}", snapshot_path.display()))?;
    let snapshot: RawActivitySnapshot = serde_json::from_str(&content)
        .with_context(|| format!("Invalid activity snapshot in {}", snapshot_path.display()))?;

    let profile = UserProfile {
        id: username.to_string(),
        login: username.to_string(),
        name: None,
        avatar_url: None,
        email: None,
        created_at: snapshot.account_created_at,
    };
    let sample = match snapshot.repositories.first() {
        Some(repo) => CommitSample::new(repo.name.clone(), commits),
        None => CommitSample {
            repository: None,
            commit_count: commits,
        },
    };

    let result = assemble_result(&profile, &snapshot, &sample, Utc::now(), &ctx.config.scoring);
    println!("{}", report_with_format(&result, format)?);
    Ok(())
}

//! CLI command definitions and handlers

mod init;
mod refresh;
mod score;
mod serve;
mod show;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{load_config, load_config_file, DevMeterConfig};
use crate::reporters::OutputFormat;
use crate::store::{MetricsStore, RedbMetricsStore};

/// DevMeter - Developer metrics from GitHub activity
#[derive(Parser, Debug)]
#[command(name = "devmeter")]
#[command(
    version,
    about = "Score developers from their GitHub activity: seniority, productivity, code quality, versatility and community impact",
    after_help = "\
Examples:
  devmeter refresh octocat             Fetch, score and store metrics for a user
  devmeter show octocat --format json  Print the stored record as JSON
  devmeter score snapshot.json         Score a saved activity snapshot offline
  devmeter serve --port 8080           Start the HTTP API"
)]
pub struct Cli {
    /// Config file (default: devmeter.toml or .devmeterrc.json in the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Metrics database path (overrides [store] path)
    #[arg(long, global = true, env = "DEVMETER_DB")]
    pub db: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch activity, score it and store the result
    Refresh {
        /// GitHub login (default: [github] username, then the token's owner)
        username: Option<String>,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Show stored metrics
    Show {
        /// User id or login
        #[arg(required_unless_present = "all")]
        user: Option<String>,

        /// Show every stored record
        #[arg(long, conflicts_with = "user")]
        all: bool,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Score a saved activity snapshot (JSON) without network access
    Score {
        /// Path to the snapshot file
        snapshot: PathBuf,

        /// Login to label the result with
        #[arg(long, default_value = "offline")]
        username: String,

        /// Sampled commit count for the line estimates
        #[arg(long, default_value = "0")]
        commits: u64,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Start the HTTP API
    Serve {
        /// Address to bind (overrides [server] bind)
        #[arg(long)]
        bind: Option<String>,

        /// Port to listen on (overrides [server] port)
        #[arg(long, short = 'p')]
        port: Option<u16>,
    },

    /// Create devmeter.toml and the user config with example settings
    Init,

    /// Show version info
    Version,
}

/// Configuration resolved from global flags
pub(crate) struct Context {
    pub config: DevMeterConfig,
    pub db_path: PathBuf,
}

impl Context {
    fn load(config_path: Option<&Path>, db: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => load_config_file(path)?,
            None => load_config(&std::env::current_dir()?),
        };
        let db_path = db
            .map(Path::to_path_buf)
            .unwrap_or_else(|| config.store.resolved_path());
        Ok(Self { config, db_path })
    }

    pub fn open_store(&self) -> Result<Arc<dyn MetricsStore>> {
        Ok(Arc::new(RedbMetricsStore::open(&self.db_path)?))
    }
}

/// Run the CLI command
pub fn run(cli: Cli) -> Result<()> {
    if let Commands::Version = cli.command {
        println!("devmeter {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    if let Commands::Init = cli.command {
        return init::run(&std::env::current_dir()?);
    }

    let ctx = Context::load(cli.config.as_deref(), cli.db.as_deref())?;
    match cli.command {
        Commands::Refresh { username, format } => {
            refresh::run(&ctx, username.as_deref(), format.parse::<OutputFormat>()?)
        }
        Commands::Show { user, all, format } => {
            show::run(&ctx, user.as_deref(), all, format.parse::<OutputFormat>()?)
        }
        Commands::Score {
            snapshot,
            username,
            commits,
            format,
        } => score::run(&ctx, &snapshot, &username, commits, format.parse::<OutputFormat>()?),
        Commands::Serve { bind, port } => serve::run(&ctx, bind, port),
        Commands::Init | Commands::Version => Ok(()),
    }
}

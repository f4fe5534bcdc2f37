//! Output reporters for DevMeter results
//!
//! Supports two output formats:
//! - `text` - Terminal dashboard with gauges
//! - `json` - Machine-readable JSON (camelCase keys)

mod json;
mod text;

use crate::models::DevMeterResult;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render a result using an OutputFormat enum
pub fn report_with_format(result: &DevMeterResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(result),
        OutputFormat::Json => json::render(result),
    }
}

/// Render several results (e.g. `show --all`)
pub fn report_many(results: &[DevMeterResult], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let rendered: Result<Vec<String>> = results.iter().map(text::render).collect();
            Ok(rendered?.join("\n"))
        }
        OutputFormat::Json => json::render_all(results),
    }
}

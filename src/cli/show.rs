//! Show command - print stored metrics

use anyhow::Result;

use super::Context;
use crate::reporters::{report_many, report_with_format, OutputFormat};

pub fn run(ctx: &Context, user: Option<&str>, all: bool, format: OutputFormat) -> Result<()> {
    let store = ctx.open_store()?;

    if all {
        let results = store.list()?;
        if results.is_empty() && format == OutputFormat::Text {
            println!("No metrics stored yet. Run `devmeter refresh` first.");
            return Ok(());
        }
        println!("{}", report_many(&results, format)?);
        return Ok(());
    }

    let user = user.ok_or_else(|| anyhow::anyhow!("Specify a user id or login, or --all"))?;
    match store.find(user)? {
        Some(result) => {
            println!("{}", report_with_format(&result, format)?);
            Ok(())
        }
        None => anyhow::bail!("No metrics stored for '{}'", user),
    }
}

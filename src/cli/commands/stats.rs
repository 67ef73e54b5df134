//! Stats command - totals and the most popular group.

use std::io;

use anyhow::Result;

use crate::cli::{format, AppContext, OutputFormat};

#[derive(clap::Args)]
pub struct Args {
    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub fn run(args: Args, ctx: &AppContext) -> Result<()> {
    let stats = ctx.open_store()?.stats()?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Text => format::write_stats(&mut io::stdout().lock(), &stats)?,
    }
    Ok(())
}

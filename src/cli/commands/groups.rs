//! Groups command - list the groups in use with their link counts.

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
    let counts = ctx.open_store()?.group_counts()?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&counts)?),
        OutputFormat::Text => format::write_group_counts(&mut io::stdout().lock(), &counts)?,
    }
    Ok(())
}

//! Search command - find links by description, tags or URL.

use std::io;

use anyhow::{bail, Result};

use crate::cli::{format, AppContext, OutputFormat};

#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    weblinks search rust             Links mentioning 'rust'\n    \
    weblinks search github.com       Links on github.com")]
pub struct Args {
    /// Text to look for in descriptions, tags and URLs
    pub query: String,

    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub fn run(args: Args, ctx: &AppContext) -> Result<()> {
    if args.query.trim().is_empty() {
        bail!("Search term cannot be empty");
    }

    let store = ctx.open_store()?;
    let links = store.search(&args.query)?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&links)?),
        OutputFormat::Text => format::write_links(&mut io::stdout().lock(), &links)?,
    }
    Ok(())
}

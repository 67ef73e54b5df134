//! Show command - display a single link.

use std::io;

use anyhow::Result;

use weblinks_cli::storage::StoreError;

use crate::cli::{format, AppContext, OutputFormat};

/// Arguments for the show command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    weblinks show 12                 Show link 12\n    \
    weblinks show 12 -f json         Output as JSON")]
pub struct Args {
    /// Link ID (see 'weblinks list')
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Executes the show command.
pub fn run(args: Args, ctx: &AppContext) -> Result<()> {
    let store = ctx.open_store()?;
    let link = store.get(args.id)?.ok_or(StoreError::NotFound(args.id))?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&link)?),
        OutputFormat::Text => format::write_link(&mut io::stdout().lock(), &link)?,
    }
    Ok(())
}

//! List command - show stored links, optionally restricted to one group.

use std::io;

use anyhow::Result;

use crate::cli::{format, AppContext, OutputFormat};

/// Arguments for the list command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    weblinks list                    All links, newest first\n    \
    weblinks list --group news       Only links in the 'news' group\n    \
    weblinks list --format json      Output as JSON")]
pub struct Args {
    /// Only show links in this group (exact match)
    #[arg(short, long, value_name = "GROUP")]
    pub group: Option<String>,

    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Executes the list command.
pub fn run(args: Args, ctx: &AppContext) -> Result<()> {
    let store = ctx.open_store()?;
    let links = match args.group.as_deref() {
        Some(group) => store.list_by_group(group)?,
        None => store.list_all()?,
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&links)?),
        OutputFormat::Text => format::write_links(&mut io::stdout().lock(), &links)?,
    }
    Ok(())
}

//! Add command - store a new link.

use anyhow::Result;
use colored::Colorize;
use tracing::debug;

use weblinks_cli::storage::NewLink;

use crate::cli::AppContext;

/// Arguments for the add command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    weblinks add \"Rust book\" https://doc.rust-lang.org/book/ -g programming\n    \
    weblinks add \"HN\" https://news.ycombinator.com -g news -t tech,daily")]
pub struct Args {
    /// Short description of the link
    #[arg(value_name = "DESCRIPTION")]
    pub description: String,

    /// Target URL (must start with http:// or https://)
    #[arg(value_name = "URL")]
    pub url: String,

    /// Group the link belongs to
    #[arg(short, long, value_name = "GROUP")]
    pub group: String,

    /// Free-text tags, e.g. "rust,learning"
    #[arg(short, long, value_name = "TAGS")]
    pub tags: Option<String>,
}

/// Executes the add command.
pub fn run(args: Args, ctx: &AppContext) -> Result<()> {
    let store = ctx.open_store()?;
    let link = NewLink::new(
        &args.description,
        args.tags.as_deref(),
        &args.url,
        &args.group,
    );

    let id = store.add(&link)?;
    debug!(id, "link added");

    println!(
        "{} {}",
        "Link added successfully!".green(),
        format!("(id {id})").dimmed()
    );
    Ok(())
}

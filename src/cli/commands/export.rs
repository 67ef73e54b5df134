//! Export command - write all links to a CSV or JSON file.
//!
//! The file name gets a `.csv` / `.json` extension appended when it does
//! not already end with one matching the chosen format.

use anyhow::{bail, Result};
use colored::Colorize;
use tracing::debug;

use weblinks_cli::storage::ExportFormat;

use crate::cli::AppContext;

/// Arguments for the export command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    weblinks export links --format csv       Writes links.csv\n    \
    weblinks export backup.json -f JSON      Writes backup.json")]
pub struct Args {
    /// Destination file
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Output format: csv or json (case-insensitive)
    #[arg(short, long, value_name = "FORMAT")]
    pub format: String,
}

/// Executes the export command.
pub fn run(args: Args, ctx: &AppContext) -> Result<()> {
    let format: ExportFormat = args.format.parse()?;
    if args.file.trim().is_empty() {
        bail!("Filename cannot be empty");
    }
    let filename = format.ensure_extension(&args.file);

    let store = ctx.open_store()?;
    let count = store.export(&filename, format)?;
    debug!(%filename, %format, count, "export finished");

    println!(
        "{}",
        format!("Links exported to {filename} successfully!").green()
    );
    Ok(())
}

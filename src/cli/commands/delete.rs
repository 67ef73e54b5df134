//! Delete command - permanently remove a link.
//!
//! Shows the link and asks for confirmation unless `--force` is given.
//! This operation is irreversible.

use std::io::{self, Write};

use anyhow::Result;
use colored::Colorize;

use weblinks_cli::storage::StoreError;

use crate::cli::AppContext;

/// Arguments for the delete command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    weblinks delete 12             Delete link 12 (prompts for confirmation)\n    \
    weblinks delete 12 --force     Delete without confirmation")]
pub struct Args {
    /// Link ID to delete
    #[arg(value_name = "ID")]
    pub id: i64,

    /// Skip the confirmation prompt
    #[arg(long)]
    #[arg(
        long_help = "Skip the confirmation prompt and proceed with deletion.\n\
        Use with caution as this operation cannot be undone."
    )]
    pub force: bool,
}

/// Executes the delete command.
pub fn run(args: Args, ctx: &AppContext) -> Result<()> {
    let store = ctx.open_store()?;
    let link = store.get(args.id)?.ok_or(StoreError::NotFound(args.id))?;

    println!();
    println!("{}", "Link to delete:".red());
    println!("  {}  {}", "Description:".dimmed(), link.description);
    println!("  {}  {}", "URL:".dimmed(), link.url);
    println!();

    if !args.force {
        print!("Delete link {}? [y/N] ", link.id.to_string().cyan());
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !is_confirmation(&input) {
            println!("{}", "Deletion cancelled.".yellow());
            return Ok(());
        }
    }

    store.delete(link.id)?;
    println!("{}", "Link deleted successfully!".green());
    Ok(())
}

/// Accepts `y` or `yes` in any case.
pub fn is_confirmation(input: &str) -> bool {
    let answer = input.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

//! Config command - show where settings and data come from

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use weblinks_cli::config::{Config, DB_ENV_VAR};

use crate::cli::AppContext;

#[derive(clap::Args)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<ConfigCommand>,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Print the config file location
    Path,
}

pub fn run(args: Args, ctx: &AppContext) -> Result<()> {
    match args.command {
        Some(ConfigCommand::Show) | None => show_config(ctx),
        Some(ConfigCommand::Path) => {
            println!("{}", Config::config_path()?.display());
            Ok(())
        }
    }
}

fn show_config(ctx: &AppContext) -> Result<()> {
    println!("{}", "weblinks configuration".bold());
    println!();

    let config_path = Config::config_path()?;
    let exists = if config_path.exists() {
        "".normal()
    } else {
        " (not found, using defaults)".dimmed()
    };
    println!(
        "  {}  {}{}",
        "Config file:".dimmed(),
        config_path.display(),
        exists
    );
    println!(
        "  {}     {} {}",
        "Database:".dimmed(),
        ctx.db_path.display(),
        format!("[{}]", ctx.db_source).dimmed()
    );
    println!();
    println!(
        "{}",
        format!("Database path precedence: --db, {DB_ENV_VAR}, config file, links.db").dimmed()
    );

    Ok(())
}

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use weblinks_cli::config::{self, Config, DB_ENV_VAR};

mod cli;

use cli::{commands, AppContext};

/// The main CLI command line interface.
#[derive(Parser)]
#[command(name = "weblinks")]
#[command(version)]
#[command(about = "Web links manager - keep your bookmarks in a local database")]
#[command(long_about = "weblinks stores links with a description, optional tags and a group\n\
    in a local SQLite file. Run it without a command for the interactive\n\
    menu, or use the subcommands below from scripts.")]
#[command(after_help = "EXAMPLES:\n    \
    weblinks                                   Start the interactive menu\n    \
    weblinks add \"Rust book\" https://doc.rust-lang.org/book/ -g programming\n    \
    weblinks list --group programming          Links in one group\n    \
    weblinks search rust                       Search descriptions, tags, URLs\n    \
    weblinks export links -f json              Write links.json\n\n\
    For more information about a command, run 'weblinks <command> --help'.")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Database file (overrides WEBLINKS_DB and the config file)
    #[arg(long, global = true, value_name = "PATH")]
    db: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Add a new link
    Add(commands::add::Args),

    /// List links, newest first
    #[command(long_about = "Lists stored links ordered by creation time, most recent\n\
        first. Use --group to restrict the list to a single group.")]
    List(commands::list::Args),

    /// Search links by description, tags or URL
    #[command(long_about = "Returns links whose description, tags or URL contain the\n\
        given text. ASCII letters match regardless of case.")]
    Search(commands::search::Args),

    /// Show a single link
    Show(commands::show::Args),

    /// Edit an existing link
    Edit(commands::edit::Args),

    /// Delete a link permanently
    Delete(commands::delete::Args),

    /// Show link statistics
    Stats(commands::stats::Args),

    /// List groups with their link counts
    Groups(commands::groups::Args),

    /// Export all links to CSV or JSON
    Export(commands::export::Args),

    /// Start the interactive menu (default)
    Menu(commands::menu::Args),

    /// Show configuration
    #[command(long_about = "Shows where the database and config file live.\n\
        Configuration is read from ~/.weblinks/config.yaml.")]
    Config(commands::config::Args),

    /// Generate shell completions
    Completions(commands::completions::Args),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "weblinks=debug,weblinks_cli=debug"
    } else {
        "weblinks=info,weblinks_cli=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();

    if let Some(Commands::Completions(args)) = &cli.command {
        commands::completions::generate_completions(&mut Cli::command(), args.shell);
        return Ok(());
    }

    // With --db set, a broken config file only warns.
    let file_config = match Config::load() {
        Ok(config) => config,
        Err(e) if cli.db.is_some() => {
            warn!("ignoring unreadable config file: {e:#}");
            Config::default()
        }
        Err(e) => return Err(e),
    };
    let env_db = std::env::var(DB_ENV_VAR).ok();
    let (db_path, db_source) = config::resolve_db_path(cli.db.as_deref(), env_db.as_deref(), &file_config);
    let ctx = AppContext { db_path, db_source };

    match cli.command {
        Some(Commands::Add(args)) => commands::add::run(args, &ctx),
        Some(Commands::List(args)) => commands::list::run(args, &ctx),
        Some(Commands::Search(args)) => commands::search::run(args, &ctx),
        Some(Commands::Show(args)) => commands::show::run(args, &ctx),
        Some(Commands::Edit(args)) => commands::edit::run(args, &ctx),
        Some(Commands::Delete(args)) => commands::delete::run(args, &ctx),
        Some(Commands::Stats(args)) => commands::stats::run(args, &ctx),
        Some(Commands::Groups(args)) => commands::groups::run(args, &ctx),
        Some(Commands::Export(args)) => commands::export::run(args, &ctx),
        Some(Commands::Menu(args)) => commands::menu::run(args, &ctx),
        Some(Commands::Config(args)) => commands::config::run(args, &ctx),
        Some(Commands::Completions(_)) => Ok(()),
        None => {
            debug!("no subcommand, starting menu");
            commands::menu::run(commands::menu::Args::default(), &ctx)
        }
    }
}

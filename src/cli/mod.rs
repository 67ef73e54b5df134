//! Command-line interface for weblinks.
//!
//! Provides one subcommand per link operation plus the interactive
//! menu that runs when no subcommand is given.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use weblinks_cli::config::DbPathSource;
use weblinks_cli::storage::LinkStore;

/// Individual CLI command implementations.
pub mod commands;

/// Terminal rendering shared by the commands and the menu.
pub mod format;

pub use format::OutputFormat;

/// Settings resolved once in `main` and handed to every command.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub db_path: PathBuf,
    pub db_source: DbPathSource,
}

impl AppContext {
    /// Opens the link store, creating the database on first use.
    pub fn open_store(&self) -> Result<LinkStore> {
        debug!(path = %self.db_path.display(), "opening link store");
        LinkStore::open(&self.db_path)
            .with_context(|| format!("Failed to open database {}", self.db_path.display()))
    }
}

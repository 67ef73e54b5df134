//! CLI commands for weblinks.
//!
//! Each submodule implements a single CLI command with its argument
//! parsing and execution logic.

/// Store a new link.
pub mod add;

/// Shell completion scripts.
pub mod completions;

/// Configuration viewing.
pub mod config;

/// Permanently remove a link.
pub mod delete;

/// Change fields of an existing link.
pub mod edit;

/// Write all links to CSV or JSON.
pub mod export;

/// Groups in use with link counts.
pub mod groups;

/// List links, optionally by group.
pub mod list;

/// Interactive numbered menu.
pub mod menu;

/// Substring search over description, tags and URL.
pub mod search;

/// Display one link.
pub mod show;

/// Totals and the most popular group.
pub mod stats;

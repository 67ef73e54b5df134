//! Edit command - change fields of an existing link.
//!
//! Fields that are not given keep their current value. The link ID and
//! creation time never change.

use anyhow::{bail, Result};
use colored::Colorize;

use weblinks_cli::storage::{NewLink, StoreError};

use crate::cli::AppContext;

/// Arguments for the edit command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    weblinks edit 12 --group reading           Move link 12 to 'reading'\n    \
    weblinks edit 12 --url https://new.example  Point link 12 elsewhere")]
pub struct Args {
    /// Link ID to edit
    #[arg(value_name = "ID")]
    pub id: i64,

    /// New description
    #[arg(short, long)]
    pub description: Option<String>,

    /// New tags
    #[arg(short, long)]
    pub tags: Option<String>,

    /// New URL (must start with http:// or https://)
    #[arg(short, long)]
    pub url: Option<String>,

    /// New group
    #[arg(short, long)]
    pub group: Option<String>,
}

impl Args {
    fn has_changes(&self) -> bool {
        self.description.is_some() || self.tags.is_some() || self.url.is_some() || self.group.is_some()
    }
}

/// Executes the edit command.
pub fn run(args: Args, ctx: &AppContext) -> Result<()> {
    if !args.has_changes() {
        bail!("Nothing to change. Pass at least one of --description, --tags, --url, --group.");
    }

    let store = ctx.open_store()?;
    let current = store.get(args.id)?.ok_or(StoreError::NotFound(args.id))?;

    let mut updated = NewLink::from(&current);
    if let Some(description) = args.description {
        updated.description = description;
    }
    if let Some(tags) = args.tags {
        updated.tags = Some(tags).filter(|t| !t.trim().is_empty());
    }
    if let Some(url) = args.url {
        updated.url = url;
    }
    if let Some(group) = args.group {
        updated.group = group;
    }

    if !store.update(args.id, &updated)? {
        // Deleted between the lookup and the update.
        return Err(StoreError::NotFound(args.id).into());
    }

    println!("{}", "Link updated successfully!".green());
    Ok(())
}

//! Configuration management
//!
//! Settings are read from `~/.weblinks/config.yaml`. A missing file means
//! defaults. The database path can also come from the `--db` flag or the
//! `WEBLINKS_DB` environment variable, which take precedence over the file.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::storage::db::DEFAULT_DB_FILE;

/// Environment variable overriding the database path.
pub const DB_ENV_VAR: &str = "WEBLINKS_DB";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Location of the SQLite file holding the links
    pub database_path: Option<PathBuf>,
}

impl Config {
    /// Loads `~/.weblinks/config.yaml`, or defaults when it does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Loads configuration from a specific file, or defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?
            .join(".weblinks");

        Ok(config_dir.join("config.yaml"))
    }
}

/// Where the effective database path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbPathSource {
    Flag,
    Env,
    ConfigFile,
    Default,
}

impl fmt::Display for DbPathSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DbPathSource::Flag => "--db flag",
            DbPathSource::Env => DB_ENV_VAR,
            DbPathSource::ConfigFile => "config file",
            DbPathSource::Default => "default",
        };
        f.write_str(label)
    }
}

/// Picks the database path: flag, then environment, then config file,
/// then `links.db` in the working directory.
///
/// Empty values are treated as unset.
pub fn resolve_db_path(
    flag: Option<&Path>,
    env: Option<&str>,
    config: &Config,
) -> (PathBuf, DbPathSource) {
    let (path, source) = if let Some(p) = flag.filter(|p| !p.as_os_str().is_empty()) {
        (p.to_path_buf(), DbPathSource::Flag)
    } else if let Some(p) = env.filter(|p| !p.is_empty()) {
        (PathBuf::from(p), DbPathSource::Env)
    } else if let Some(p) = config
        .database_path
        .as_ref()
        .filter(|p| !p.as_os_str().is_empty())
    {
        (p.clone(), DbPathSource::ConfigFile)
    } else {
        (PathBuf::from(DEFAULT_DB_FILE), DbPathSource::Default)
    };

    debug!(path = %path.display(), %source, "resolved database path");
    (path, source)
}

//! Link export to CSV and JSON files.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use super::error::{Result, StoreError};
use super::models::{format_timestamp, Link};

/// Column headers written as the first CSV row.
pub const CSV_HEADER: [&str; 6] = ["ID", "Description", "Tags", "URL", "Group", "Created At"];

/// Export file formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// Pretty-printed JSON array.
    Json,
}

impl ExportFormat {
    /// File extension for this format, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// Appends `.csv` / `.json` when `filename` does not already end with it.
    pub fn ensure_extension(&self, filename: &str) -> String {
        let suffix = format!(".{}", self.extension());
        if filename.ends_with(&suffix) {
            filename.to_string()
        } else {
            format!("{filename}{suffix}")
        }
    }
}

impl FromStr for ExportFormat {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(StoreError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Writes `links` to `path` in the given format, replacing any existing file.
pub fn write_links(path: &Path, format: ExportFormat, links: &[Link]) -> Result<()> {
    match format {
        ExportFormat::Csv => write_csv(path, links),
        ExportFormat::Json => write_json(path, links),
    }
}

fn write_csv(path: &Path, links: &[Link]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(CSV_HEADER)?;

    for link in links {
        writer.write_record([
            link.id.to_string().as_str(),
            link.description.as_str(),
            link.tags.as_deref().unwrap_or(""),
            link.url.as_str(),
            link.group.as_str(),
            format_timestamp(&link.created_at).as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn write_json(path: &Path, links: &[Link]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, links)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

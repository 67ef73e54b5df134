//! Output formatting utilities for CLI commands.
//!
//! Provides a unified `OutputFormat` enum and the colored renderers used
//! by both the subcommands and the interactive menu.

use std::io::{self, Write};

use clap::ValueEnum;
use colored::Colorize;

use weblinks_cli::storage::{format_timestamp, GroupCount, Link, LinkStats};

/// Width of the separator printed between links.
const SEPARATOR_WIDTH: usize = 50;

/// Output format options for CLI commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default).
    #[default]
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Writes a single link as a colored block.
pub fn write_link(out: &mut impl Write, link: &Link) -> io::Result<()> {
    writeln!(out, "{}", format!("ID: {}", link.id).cyan())?;
    writeln!(out, "Description: {}", link.description)?;
    if let Some(tags) = link.tags.as_deref().filter(|t| !t.is_empty()) {
        writeln!(out, "{}", format!("Tags: {tags}").purple())?;
    }
    writeln!(out, "{}", format!("URL: {}", link.url).blue())?;
    writeln!(out, "{}", format!("Group: {}", link.group).green())?;
    writeln!(
        out,
        "{}",
        format!("Created: {}", format_timestamp(&link.created_at)).yellow()
    )?;
    writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH))
}

/// Writes a titled list of links, or a notice when there are none.
pub fn write_links(out: &mut impl Write, links: &[Link]) -> io::Result<()> {
    writeln!(out, "{}", format!("Links ({} total)", links.len()).yellow())?;
    writeln!(out)?;

    if links.is_empty() {
        return writeln!(out, "{}", "No links found.".yellow());
    }

    for link in links {
        write_link(out, link)?;
    }
    Ok(())
}

/// Writes the statistics screen body.
pub fn write_stats(out: &mut impl Write, stats: &LinkStats) -> io::Result<()> {
    writeln!(out, "{}", format!("Total Links: {}", stats.total_links).cyan())?;
    writeln!(out, "{}", format!("Total Groups: {}", stats.total_groups).cyan())?;

    let popular = match &stats.most_popular_group {
        Some(top) => format!("Most Popular Group: {} ({} links)", top.group, top.count),
        None => "Most Popular Group: None".to_string(),
    };
    writeln!(out, "{}", popular.cyan())
}

/// Writes the numbered group list with link counts.
pub fn write_group_counts(out: &mut impl Write, groups: &[GroupCount]) -> io::Result<()> {
    if groups.is_empty() {
        return writeln!(out, "{}", "No groups found.".yellow());
    }

    for (i, group) in groups.iter().enumerate() {
        writeln!(
            out,
            "{}",
            format!("{}. {} ({} links)", i + 1, group.group, group.count).cyan()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn sample_link(tags: Option<&str>) -> Link {
        Link {
            id: 3,
            description: "Rust book".to_string(),
            tags: tags.map(str::to_string),
            url: "https://doc.rust-lang.org/book/".to_string(),
            group: "programming".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 6).unwrap(),
        }
    }

    #[test]
    fn test_output_format_default() {
        let format = OutputFormat::default();
        assert_eq!(format, OutputFormat::Text);
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(
            OutputFormat::from_str("text", false).unwrap(),
            OutputFormat::Text
        );
        assert_eq!(
            OutputFormat::from_str("json", false).unwrap(),
            OutputFormat::Json
        );
    }

    #[test]
    fn test_write_link() {
        let text = render(|out| write_link(out, &sample_link(Some("rust"))));

        assert!(text.contains("ID: 3"));
        assert!(text.contains("Tags: rust"));
        assert!(text.contains("Group: programming"));
        assert!(text.contains("Created: 2024-02-03 04:05:06"));
    }

    #[test]
    fn test_write_link_hides_missing_tags() {
        let text = render(|out| write_link(out, &sample_link(None)));
        assert!(!text.contains("Tags:"));
    }

    #[test]
    fn test_write_links_empty() {
        let text = render(|out| write_links(out, &[]));
        assert!(text.contains("Links (0 total)"));
        assert!(text.contains("No links found."));
    }

    #[test]
    fn test_write_stats() {
        let stats = LinkStats {
            total_links: 3,
            total_groups: 2,
            most_popular_group: Some(GroupCount {
                group: "news".to_string(),
                count: 2,
            }),
        };
        let text = render(|out| write_stats(out, &stats));
        assert!(text.contains("Total Links: 3"));
        assert!(text.contains("Most Popular Group: news (2 links)"));

        let empty = LinkStats {
            total_links: 0,
            total_groups: 0,
            most_popular_group: None,
        };
        let text = render(|out| write_stats(out, &empty));
        assert!(text.contains("Most Popular Group: None"));
    }
}

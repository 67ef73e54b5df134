//! Core data models for weblinks
//!
//! A [`Link`] is the only stored entity. Groups are not stored on their
//! own; they are the distinct `file_group` values currently in use.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp layout used for `created_at` in the database and in exports.
///
/// Matches SQLite's `CURRENT_TIMESTAMP` output.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A stored bookmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Store-assigned identifier, never reused
    pub id: i64,

    /// What the link points at
    pub description: String,

    /// Free-text tags, matched as a raw substring
    pub tags: Option<String>,

    /// Target URL (always `http://` or `https://`)
    pub url: String,

    /// The group this link belongs to
    #[serde(rename = "file_group")]
    pub group: String,

    /// When the link was added; never changes on edit
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for creating or replacing a link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewLink {
    pub description: String,
    pub tags: Option<String>,
    pub url: String,
    pub group: String,
}

impl NewLink {
    /// Builds a new link from borrowed fields.
    ///
    /// Blank tags are normalised to `None`.
    pub fn new(description: &str, tags: Option<&str>, url: &str, group: &str) -> Self {
        Self {
            description: description.to_string(),
            tags: tags
                .filter(|t| !t.trim().is_empty())
                .map(|t| t.to_string()),
            url: url.to_string(),
            group: group.to_string(),
        }
    }
}

impl From<&Link> for NewLink {
    fn from(link: &Link) -> Self {
        Self {
            description: link.description.clone(),
            tags: link.tags.clone(),
            url: link.url.clone(),
            group: link.group.clone(),
        }
    }
}

/// A group together with the number of links that carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount {
    pub group: String,
    pub count: i64,
}

/// Aggregate numbers over the whole store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkStats {
    pub total_links: i64,
    pub total_groups: i64,

    /// Group with the most links; ties go to the alphabetically first group
    pub most_popular_group: Option<GroupCount>,
}

/// Formats a timestamp the way it is stored.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a stored timestamp back into UTC.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).map(|n| n.and_utc())
}

/// Serde adapter keeping `created_at` in the stored text layout.
mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(at))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_timestamp(&s).map_err(de::Error::custom)
    }
}

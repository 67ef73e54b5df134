//! SQLite storage layer for weblinks
//!
//! [`LinkStore`] keeps only the database path. Every operation opens its own
//! connection and drops it before returning, so no handle outlives a call.

use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use super::error::{Result, StoreError};
use super::export::{self, ExportFormat};
use super::models::{format_timestamp, parse_timestamp, GroupCount, Link, LinkStats, NewLink};

/// Database file used when nothing else is configured.
pub const DEFAULT_DB_FILE: &str = "links.db";

const LINK_COLUMNS: &str = "id, description, tags, url, file_group, created_at";

/// Persistent link collection backed by a single SQLite file.
#[derive(Debug, Clone)]
pub struct LinkStore {
    path: PathBuf,
}

impl LinkStore {
    /// Opens (or creates) the store at `path` and ensures the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
        };
        store.initialize()?;
        Ok(store)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        Ok(Connection::open(&self.path)?)
    }

    /// Creates the `links` table if missing. Safe to call on every startup.
    pub fn initialize(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = self.connect()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS links (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                description TEXT NOT NULL,
                tags TEXT,
                url TEXT NOT NULL,
                file_group TEXT NOT NULL,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_links_file_group ON links(file_group);
            CREATE INDEX IF NOT EXISTS idx_links_created_at ON links(created_at);
            "#,
        )?;
        Ok(())
    }

    // ==================== Writes ====================

    /// Adds a link and returns its newly assigned id.
    pub fn add(&self, link: &NewLink) -> Result<i64> {
        validate(link)?;

        let conn = self.connect()?;
        conn.execute(
            r#"
            INSERT INTO links (description, tags, url, file_group, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                link.description,
                link.tags,
                link.url,
                link.group,
                format_timestamp(&Utc::now()),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Replaces the editable fields of link `id`.
    ///
    /// Returns `Ok(false)` when no link has that id; nothing is created in
    /// that case. `id` and `created_at` never change.
    pub fn update(&self, id: i64, link: &NewLink) -> Result<bool> {
        validate(link)?;

        let conn = self.connect()?;
        let changed = conn.execute(
            r#"
            UPDATE links
            SET description = ?1, tags = ?2, url = ?3, file_group = ?4
            WHERE id = ?5
            "#,
            params![link.description, link.tags, link.url, link.group, id],
        )?;
        Ok(changed > 0)
    }

    /// Permanently removes link `id`. Returns `Ok(false)` when nothing matched.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let conn = self.connect()?;
        let deleted = conn.execute("DELETE FROM links WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    // ==================== Reads ====================

    /// Gets a link by id
    pub fn get(&self, id: i64) -> Result<Option<Link>> {
        let conn = self.connect()?;
        let link = conn
            .query_row(
                &format!("SELECT {LINK_COLUMNS} FROM links WHERE id = ?1"),
                params![id],
                row_to_link,
            )
            .optional()?;
        Ok(link)
    }

    /// All links, most recent first.
    pub fn list_all(&self) -> Result<Vec<Link>> {
        self.query_links("", params![])
    }

    /// Links whose group is exactly `group`, most recent first.
    pub fn list_by_group(&self, group: &str) -> Result<Vec<Link>> {
        self.query_links("WHERE file_group = ?1", params![group])
    }

    /// Links whose description, tags or url contain `term`.
    ///
    /// Uses SQLite `LIKE`, so ASCII letters match regardless of case.
    /// Wildcard characters in `term` match literally. An empty term
    /// matches every link.
    pub fn search(&self, term: &str) -> Result<Vec<Link>> {
        let pattern = format!("%{}%", escape_like(term));
        self.query_links(
            r"WHERE description LIKE ?1 ESCAPE '\'
                OR tags LIKE ?1 ESCAPE '\'
                OR url LIKE ?1 ESCAPE '\'",
            params![pattern],
        )
    }

    fn query_links(&self, filter: &str, args: &[&dyn rusqlite::ToSql]) -> Result<Vec<Link>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {LINK_COLUMNS} FROM links {filter} ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt.query_map(args, row_to_link)?;
        let links = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(links)
    }

    // ==================== Groups & Stats ====================

    /// Distinct groups in use, sorted ascending.
    pub fn list_groups(&self) -> Result<Vec<String>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT DISTINCT file_group FROM links ORDER BY file_group")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        let groups = rows.collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(groups)
    }

    /// Every group with its link count, sorted by group name.
    pub fn group_counts(&self) -> Result<Vec<GroupCount>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT file_group, COUNT(*) FROM links GROUP BY file_group ORDER BY file_group",
        )?;
        let rows = stmt.query_map([], row_to_group_count)?;
        let counts = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(counts)
    }

    /// Totals plus the most popular group.
    ///
    /// When several groups share the highest count, the alphabetically
    /// first one wins.
    pub fn stats(&self) -> Result<LinkStats> {
        let conn = self.connect()?;

        let (total_links, total_groups): (i64, i64) = conn.query_row(
            "SELECT COUNT(*), COUNT(DISTINCT file_group) FROM links",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        let most_popular_group = conn
            .query_row(
                r#"
                SELECT file_group, COUNT(*) AS count
                FROM links
                GROUP BY file_group
                ORDER BY count DESC, file_group ASC
                LIMIT 1
                "#,
                [],
                row_to_group_count,
            )
            .optional()?;

        Ok(LinkStats {
            total_links,
            total_groups,
            most_popular_group,
        })
    }

    // ==================== Export ====================

    /// Writes every link, in [`list_all`](Self::list_all) order, to `path`.
    ///
    /// Returns the number of links written.
    pub fn export(&self, path: impl AsRef<Path>, format: ExportFormat) -> Result<usize> {
        let links = self.list_all()?;
        export::write_links(path.as_ref(), format, &links)?;
        Ok(links.len())
    }
}

/// Checks the invariants every stored link must satisfy.
fn validate(link: &NewLink) -> Result<()> {
    if link.description.trim().is_empty() {
        return Err(StoreError::EmptyField("description"));
    }
    if !has_web_scheme(&link.url) {
        return Err(StoreError::InvalidUrl(link.url.clone()));
    }
    if link.group.trim().is_empty() {
        return Err(StoreError::EmptyField("group"));
    }
    Ok(())
}

/// True when `url` starts with `http://` or `https://`.
pub fn has_web_scheme(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn row_to_link(row: &rusqlite::Row) -> rusqlite::Result<Link> {
    let created_at: String = row.get(5)?;
    let created_at = parse_timestamp(&created_at).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Link {
        id: row.get(0)?,
        description: row.get(1)?,
        tags: row.get(2)?,
        url: row.get(3)?,
        group: row.get(4)?,
        created_at,
    })
}

fn row_to_group_count(row: &rusqlite::Row) -> rusqlite::Result<GroupCount> {
    Ok(GroupCount {
        group: row.get(0)?,
        count: row.get(1)?,
    })
}

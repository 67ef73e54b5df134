//! Menu command - the interactive, numbered terminal menu.
//!
//! Runs by default when `weblinks` is started without a subcommand. Each
//! screen reads answers line by line, calls the link store and reports
//! the outcome in color. End of input leaves the menu cleanly.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::Result;
use colored::Colorize;
use tracing::debug;

use weblinks_cli::storage::{ExportFormat, Link, LinkStore, NewLink, StoreError};

use crate::cli::commands::delete::is_confirmation;
use crate::cli::{format, AppContext};

const RULE_WIDTH: usize = 60;

/// Arguments for the menu command.
#[derive(clap::Args, Default)]
pub struct Args {
    /// Don't clear the screen between menus
    #[arg(long)]
    pub no_clear: bool,
}

/// Executes the menu command.
pub fn run(args: Args, ctx: &AppContext) -> Result<()> {
    let store = ctx.open_store()?;
    let clear = !args.no_clear && io::stdout().is_terminal();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = MenuSession::new(&store, stdin.lock(), stdout.lock()).clear_screen(clear);
    session.run()
}

/// Whether the session should keep going after a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// One interactive session over a link store.
pub struct MenuSession<'a, R, W> {
    store: &'a LinkStore,
    input: R,
    out: W,
    clear: bool,
}

impl<'a, R: BufRead, W: Write> MenuSession<'a, R, W> {
    pub fn new(store: &'a LinkStore, input: R, out: W) -> Self {
        Self {
            store,
            input,
            out,
            clear: false,
        }
    }

    /// Clear the terminal before every screen.
    pub fn clear_screen(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }

    /// Shows the main menu until the user picks `0` or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.header()?;
            self.print_menu()?;

            let Some(choice) = self.prompt("Enter your choice")? else {
                writeln!(self.out)?;
                break;
            };
            debug!(choice = %choice.trim(), "menu choice");

            let flow = match choice.trim() {
                "1" => self.add_link()?,
                "2" => self.view_all()?,
                "3" => self.view_by_group()?,
                "4" => self.search()?,
                "5" => self.edit_link()?,
                "6" => self.delete_link()?,
                "7" => self.view_stats()?,
                "8" => self.export()?,
                "9" => self.view_groups()?,
                "0" => {
                    writeln!(self.out, "{}", "Goodbye!".green())?;
                    Flow::Quit
                }
                _ => {
                    self.error("Invalid choice! Please try again.")?;
                    self.pause()?
                }
            };

            if flow == Flow::Quit {
                break;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    // ==================== Screens ====================

    fn add_link(&mut self) -> Result<Flow> {
        self.title("Add New Link")?;

        let Some(description) = self.prompt("Enter description")? else {
            return Ok(Flow::Quit);
        };
        if description.trim().is_empty() {
            self.error("Description cannot be empty!")?;
            return self.pause();
        }
        let Some(tags) = self.prompt("Enter tags (optional)")? else {
            return Ok(Flow::Quit);
        };
        let Some(url) = self.prompt("Enter URL")? else {
            return Ok(Flow::Quit);
        };
        let Some(group) = self.prompt("Enter group")? else {
            return Ok(Flow::Quit);
        };

        let link = NewLink::new(&description, Some(&tags), &url, &group);
        match self.store.add(&link) {
            Ok(_) => self.success("Link added successfully!")?,
            Err(e) => self.store_error("Error adding link", &e)?,
        }
        self.pause()
    }

    fn view_all(&mut self) -> Result<Flow> {
        match self.store.list_all() {
            Ok(links) => self.show_links(&links),
            Err(e) => {
                self.store_error("Error loading links", &e)?;
                self.pause()
            }
        }
    }

    fn show_links(&mut self, links: &[Link]) -> Result<Flow> {
        self.header()?;
        format::write_links(&mut self.out, links)?;
        self.pause()
    }

    fn view_by_group(&mut self) -> Result<Flow> {
        let groups = match self.store.list_groups() {
            Ok(groups) => groups,
            Err(e) => {
                self.store_error("Error loading groups", &e)?;
                return self.pause();
            }
        };
        if groups.is_empty() {
            writeln!(self.out, "{}", "No groups found.".yellow())?;
            return self.pause();
        }

        self.title("Available Groups:")?;
        for (i, group) in groups.iter().enumerate() {
            writeln!(self.out, "{}. {}", i + 1, group)?;
        }
        writeln!(self.out)?;

        let Some(answer) = self.prompt("Select group number")? else {
            return Ok(Flow::Quit);
        };
        // "-1" is a number, just out of range.
        let choice = match answer.trim().parse::<i64>() {
            Ok(n) => n,
            Err(_) => {
                self.error("Please enter a valid number!")?;
                return self.pause();
            }
        };

        let picked = choice
            .checked_sub(1)
            .and_then(|i| usize::try_from(i).ok())
            .and_then(|i| groups.get(i));
        match picked {
            Some(group) => match self.store.list_by_group(group) {
                Ok(links) => self.show_links(&links),
                Err(e) => {
                    self.store_error("Error loading links", &e)?;
                    self.pause()
                }
            },
            None => {
                self.error("Invalid choice!")?;
                self.pause()
            }
        }
    }

    fn search(&mut self) -> Result<Flow> {
        self.title("Search Links")?;

        let Some(query) = self.prompt("Enter search term")? else {
            return Ok(Flow::Quit);
        };
        if query.trim().is_empty() {
            self.error("Search term cannot be empty!")?;
            return self.pause();
        }

        match self.store.search(&query) {
            Ok(links) => self.show_links(&links),
            Err(e) => {
                self.store_error("Error searching links", &e)?;
                self.pause()
            }
        }
    }

    fn edit_link(&mut self) -> Result<Flow> {
        self.title("Edit Link")?;

        let Some(id) = self.prompt("Enter link ID to edit")? else {
            return Ok(Flow::Quit);
        };
        let Ok(id) = id.trim().parse::<i64>() else {
            self.error("Please enter a valid ID!")?;
            return self.pause();
        };
        let link = match self.store.get(id) {
            Ok(Some(link)) => link,
            Ok(None) => {
                self.error("Link not found!")?;
                return self.pause();
            }
            Err(e) => {
                self.store_error("Error loading link", &e)?;
                return self.pause();
            }
        };

        writeln!(self.out, "{}", "Current link details:".cyan())?;
        writeln!(self.out, "Description: {}", link.description)?;
        writeln!(self.out, "Tags: {}", link.tags.as_deref().unwrap_or(""))?;
        writeln!(self.out, "URL: {}", link.url)?;
        writeln!(self.out, "Group: {}", link.group)?;
        writeln!(self.out)?;

        let Some(description) =
            self.prompt("Enter new description (or press Enter to keep current)")?
        else {
            return Ok(Flow::Quit);
        };
        let Some(tags) = self.prompt("Enter new tags (or press Enter to keep current)")? else {
            return Ok(Flow::Quit);
        };
        let Some(url) = self.prompt("Enter new URL (or press Enter to keep current)")? else {
            return Ok(Flow::Quit);
        };
        let Some(group) = self.prompt("Enter new group (or press Enter to keep current)")? else {
            return Ok(Flow::Quit);
        };

        let mut updated = NewLink::from(&link);
        if !description.trim().is_empty() {
            updated.description = description;
        }
        if !tags.trim().is_empty() {
            updated.tags = Some(tags);
        }
        if !url.trim().is_empty() {
            updated.url = url;
        }
        if !group.trim().is_empty() {
            updated.group = group;
        }

        match self.store.update(id, &updated) {
            Ok(true) => self.success("Link updated successfully!")?,
            Ok(false) => self.error("Link not found!")?,
            Err(e) => self.store_error("Error updating link", &e)?,
        }
        self.pause()
    }

    fn delete_link(&mut self) -> Result<Flow> {
        self.title("Delete Link")?;

        let Some(id) = self.prompt("Enter link ID to delete")? else {
            return Ok(Flow::Quit);
        };
        let Ok(id) = id.trim().parse::<i64>() else {
            self.error("Please enter a valid ID!")?;
            return self.pause();
        };
        let link = match self.store.get(id) {
            Ok(Some(link)) => link,
            Ok(None) => {
                self.error("Link not found!")?;
                return self.pause();
            }
            Err(e) => {
                self.store_error("Error loading link", &e)?;
                return self.pause();
            }
        };

        writeln!(self.out, "{}", "Link to delete:".red())?;
        writeln!(self.out, "Description: {}", link.description)?;
        writeln!(self.out, "URL: {}", link.url)?;
        writeln!(self.out)?;

        let Some(confirm) = self.prompt("Are you sure? (yes/no)")? else {
            return Ok(Flow::Quit);
        };
        if is_confirmation(&confirm) {
            match self.store.delete(id) {
                Ok(_) => self.success("Link deleted successfully!")?,
                Err(e) => self.store_error("Error deleting link", &e)?,
            }
        } else {
            writeln!(self.out, "{}", "Deletion cancelled.".yellow())?;
        }
        self.pause()
    }

    fn view_stats(&mut self) -> Result<Flow> {
        self.title("Statistics")?;
        match self.store.stats() {
            Ok(stats) => format::write_stats(&mut self.out, &stats)?,
            Err(e) => self.store_error("Error loading statistics", &e)?,
        }
        writeln!(self.out)?;
        self.pause()
    }

    fn export(&mut self) -> Result<Flow> {
        self.title("Export Links")?;
        writeln!(self.out, "Available formats: CSV, JSON")?;

        let Some(answer) = self.prompt("Enter format")? else {
            return Ok(Flow::Quit);
        };
        let Ok(format) = answer.parse::<ExportFormat>() else {
            self.error("Unsupported format!")?;
            return self.pause();
        };

        let Some(filename) = self.prompt("Enter filename")? else {
            return Ok(Flow::Quit);
        };
        if filename.trim().is_empty() {
            self.error("Filename cannot be empty!")?;
            return self.pause();
        }
        let filename = format.ensure_extension(&filename);

        match self.store.export(&filename, format) {
            Ok(count) => {
                debug!(%filename, count, "export finished");
                self.success(&format!("Links exported to {filename} successfully!"))?;
            }
            Err(e) => self.store_error("Error exporting links", &e)?,
        }
        self.pause()
    }

    fn view_groups(&mut self) -> Result<Flow> {
        self.title("Available Groups")?;
        match self.store.group_counts() {
            Ok(counts) => format::write_group_counts(&mut self.out, &counts)?,
            Err(e) => self.store_error("Error loading groups", &e)?,
        }
        writeln!(self.out)?;
        self.pause()
    }

    // ==================== Helpers ====================

    fn header(&mut self) -> io::Result<()> {
        if self.clear {
            write!(self.out, "\x1B[2J\x1B[1;1H")?;
        }
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.out, "{}", rule.cyan())?;
        writeln!(
            self.out,
            "{}",
            "           Web Links Manager - Terminal Version".bold()
        )?;
        writeln!(self.out, "{}", rule.cyan())?;
        writeln!(self.out)
    }

    fn title(&mut self, title: &str) -> io::Result<()> {
        self.header()?;
        writeln!(self.out, "{}", title.yellow())?;
        writeln!(self.out)
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", "Main Menu:".yellow())?;
        for entry in [
            "1. Add new link",
            "2. View all links",
            "3. View links by group",
            "4. Search links",
            "5. Edit link",
            "6. Delete link",
            "7. View statistics",
            "8. Export links",
            "9. View groups",
            "0. Exit",
        ] {
            writeln!(self.out, "{entry}")?;
        }
        writeln!(self.out)
    }

    /// Reads one line after showing `label`. `None` means input has ended.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.out, "{}: ", label.cyan())?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn pause(&mut self) -> Result<Flow> {
        write!(self.out, "Press Enter to continue...")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(Flow::Quit);
        }
        Ok(Flow::Continue)
    }

    fn success(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{}", message.green())
    }

    fn error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{}", message.red())
    }

    fn store_error(&mut self, context: &str, err: &StoreError) -> io::Result<()> {
        let message = match err {
            StoreError::InvalidUrl(_) => "URL must start with http:// or https://".to_string(),
            StoreError::EmptyField(field) => format!("{} cannot be empty!", capitalize(field)),
            other => format!("{context}: {other}"),
        };
        self.error(&message)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    /// Runs a scripted session and returns the store and everything printed.
    fn run_script(store: &LinkStore, script: &str) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        MenuSession::new(store, Cursor::new(script.as_bytes().to_vec()), &mut out)
            .run()
            .expect("Session should not fail");
        String::from_utf8(out).unwrap()
    }

    fn create_test_store() -> (LinkStore, tempfile::TempDir) {
        let dir = tempdir().expect("Failed to create temp directory");
        let store = LinkStore::open(dir.path().join("menu.db")).expect("Failed to open store");
        (store, dir)
    }

    fn seed(store: &LinkStore, description: &str, url: &str, group: &str) -> i64 {
        store
            .add(&NewLink::new(description, None, url, group))
            .expect("Failed to seed link")
    }

    #[test]
    fn test_exit_immediately() {
        let (store, _dir) = create_test_store();
        let output = run_script(&store, "0\n");

        assert!(output.contains("Main Menu:"));
        assert!(output.contains("Goodbye!"));
    }

    #[test]
    fn test_end_of_input_exits() {
        let (store, _dir) = create_test_store();
        let output = run_script(&store, "");
        assert!(output.contains("Enter your choice"));
    }

    #[test]
    fn test_invalid_choice_loops() {
        let (store, _dir) = create_test_store();
        let output = run_script(&store, "x\n\n0\n");

        assert!(output.contains("Invalid choice! Please try again."));
        assert!(output.contains("Goodbye!"));
    }

    #[test]
    fn test_add_link() {
        let (store, _dir) = create_test_store();
        let output = run_script(
            &store,
            "1\nRust book\nrust,learning\nhttps://doc.rust-lang.org/book/\nprogramming\n\n0\n",
        );

        assert!(output.contains("Link added successfully!"));
        let links = store.list_all().unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].description, "Rust book");
        assert_eq!(links[0].tags.as_deref(), Some("rust,learning"));
        assert_eq!(links[0].group, "programming");
    }

    #[test]
    fn test_add_link_without_tags_stores_none() {
        let (store, _dir) = create_test_store();
        run_script(&store, "1\nDocs\n\nhttps://docs.rs\nrust\n\n0\n");

        assert_eq!(store.list_all().unwrap()[0].tags, None);
    }

    #[test]
    fn test_add_link_rejects_empty_description() {
        let (store, _dir) = create_test_store();
        let output = run_script(&store, "1\n   \n\n0\n");

        assert!(output.contains("Description cannot be empty!"));
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_add_link_rejects_bad_url() {
        let (store, _dir) = create_test_store();
        let output = run_script(&store, "1\nFiles\n\nftp://example.com\nmisc\n\n0\n");

        assert!(output.contains("URL must start with http:// or https://"));
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_add_link_rejects_empty_group() {
        let (store, _dir) = create_test_store();
        let output = run_script(&store, "1\nDocs\n\nhttps://docs.rs\n\n\n0\n");

        assert!(output.contains("Group cannot be empty!"));
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_view_all() {
        let (store, _dir) = create_test_store();
        seed(&store, "First", "https://one.test", "a");
        seed(&store, "Second", "https://two.test", "b");

        let output = run_script(&store, "2\n\n0\n");

        assert!(output.contains("Links (2 total)"));
        assert!(output.contains("Description: First"));
        assert!(output.contains("Description: Second"));
    }

    #[test]
    fn test_view_by_group() {
        let (store, _dir) = create_test_store();
        seed(&store, "Paper", "https://paper.test", "news");
        seed(&store, "Crate", "https://crate.test", "tech");

        let output = run_script(&store, "3\n2\n\n0\n");

        assert!(output.contains("1. news"));
        assert!(output.contains("2. tech"));
        assert!(output.contains("Links (1 total)"));
        assert!(output.contains("Description: Crate"));
        assert!(!output.contains("Description: Paper"));
    }

    #[test]
    fn test_view_by_group_bad_input() {
        let (store, _dir) = create_test_store();
        seed(&store, "Paper", "https://paper.test", "news");

        let output = run_script(&store, "3\nabc\n\n3\n5\n\n3\n0\n\n0\n");

        assert!(output.contains("Please enter a valid number!"));
        assert_eq!(output.matches("Invalid choice!").count(), 2);
    }

    #[test]
    fn test_view_by_group_negative_number_is_out_of_range() {
        let (store, _dir) = create_test_store();
        seed(&store, "Paper", "https://paper.test", "news");

        let output = run_script(&store, "3\n-1\n\n0\n");

        assert!(output.contains("Invalid choice!"));
        assert!(!output.contains("Please enter a valid number!"));
    }

    #[test]
    fn test_view_by_group_without_groups() {
        let (store, _dir) = create_test_store();
        let output = run_script(&store, "3\n\n0\n");
        assert!(output.contains("No groups found."));
    }

    #[test]
    fn test_search() {
        let (store, _dir) = create_test_store();
        seed(&store, "Rust book", "https://doc.rust-lang.org/book/", "prog");
        seed(&store, "Weather", "https://weather.test", "life");

        let output = run_script(&store, "4\nrust\n\n0\n");

        assert!(output.contains("Links (1 total)"));
        assert!(output.contains("Description: Rust book"));
    }

    #[test]
    fn test_search_rejects_blank_term() {
        let (store, _dir) = create_test_store();
        let output = run_script(&store, "4\n  \n\n0\n");
        assert!(output.contains("Search term cannot be empty!"));
    }

    #[test]
    fn test_edit_keeps_blank_fields() {
        let (store, _dir) = create_test_store();
        let id = store
            .add(&NewLink::new("Old", Some("t1"), "https://old.test", "g1"))
            .unwrap();

        let script = format!("5\n{id}\nNew\n\n\ng2\n\n0\n");
        let output = run_script(&store, &script);

        assert!(output.contains("Current link details:"));
        assert!(output.contains("Link updated successfully!"));
        let link = store.get(id).unwrap().unwrap();
        assert_eq!(link.description, "New");
        assert_eq!(link.tags.as_deref(), Some("t1"));
        assert_eq!(link.url, "https://old.test");
        assert_eq!(link.group, "g2");
    }

    #[test]
    fn test_edit_unknown_and_invalid_id() {
        let (store, _dir) = create_test_store();
        let output = run_script(&store, "5\n42\n\n5\nabc\n\n0\n");

        assert!(output.contains("Link not found!"));
        assert!(output.contains("Please enter a valid ID!"));
    }

    #[test]
    fn test_edit_rejects_bad_url() {
        let (store, _dir) = create_test_store();
        let id = seed(&store, "Site", "https://site.test", "g");

        let script = format!("5\n{id}\n\n\nmailto:me@site.test\n\n\n0\n");
        let output = run_script(&store, &script);

        assert!(output.contains("URL must start with http:// or https://"));
        assert_eq!(store.get(id).unwrap().unwrap().url, "https://site.test");
    }

    #[test]
    fn test_delete_confirmed() {
        let (store, _dir) = create_test_store();
        let id = seed(&store, "Gone", "https://gone.test", "g");

        let output = run_script(&store, &format!("6\n{id}\nYes\n\n0\n"));

        assert!(output.contains("Link deleted successfully!"));
        assert!(store.get(id).unwrap().is_none());
    }

    #[test]
    fn test_delete_cancelled() {
        let (store, _dir) = create_test_store();
        let id = seed(&store, "Stays", "https://stays.test", "g");

        let output = run_script(&store, &format!("6\n{id}\nno\n\n0\n"));

        assert!(output.contains("Deletion cancelled."));
        assert!(store.get(id).unwrap().is_some());
    }

    #[test]
    fn test_stats() {
        let (store, _dir) = create_test_store();
        seed(&store, "n1", "https://n1.test", "news");
        seed(&store, "n2", "https://n2.test", "news");
        seed(&store, "t1", "https://t1.test", "tech");

        let output = run_script(&store, "7\n\n0\n");

        assert!(output.contains("Total Links: 3"));
        assert!(output.contains("Total Groups: 2"));
        assert!(output.contains("Most Popular Group: news (2 links)"));
    }

    #[test]
    fn test_export_appends_extension() {
        let (store, dir) = create_test_store();
        seed(&store, "Docs", "https://docs.rs", "rust");
        let base = dir.path().join("backup");

        let output = run_script(&store, &format!("8\nJSON\n{}\n\n0\n", base.display()));

        let expected = dir.path().join("backup.json");
        assert!(output.contains("successfully!"), "{output}");
        assert!(expected.exists());
    }

    #[test]
    fn test_export_rejects_unknown_format() {
        let (store, _dir) = create_test_store();
        let output = run_script(&store, "8\nxml\n\n0\n");
        assert!(output.contains("Unsupported format!"));
    }

    #[test]
    fn test_view_groups_with_counts() {
        let (store, _dir) = create_test_store();
        seed(&store, "n1", "https://n1.test", "news");
        seed(&store, "n2", "https://n2.test", "news");
        seed(&store, "t1", "https://t1.test", "tech");

        let output = run_script(&store, "9\n\n0\n");

        assert!(output.contains("1. news (2 links)"));
        assert!(output.contains("2. tech (1 links)"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("group"), "Group");
        assert_eq!(capitalize(""), "");
    }
}

//! Comma-separated summary rows and the append-only treasure log.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{RenderError, RenderResult};
use crate::summary::ItemSummary;

/// Header line written once at the top of a new treasure log.
pub const CSV_HEADER: &str = "Item Name,Effects,XP,GP,Is Cursed";

/// One CSV row for an item, newline-terminated.
///
/// Text fields are always quoted with embedded quotes doubled. The cursed
/// flag is written as `True` or `False`.
pub fn csv_row(summary: &ItemSummary) -> String {
    format!(
        "{},{},{},{},{}\n",
        quote(&summary.name),
        quote(&summary.effects_text()),
        summary.xp,
        summary.gp,
        if summary.cursed { "True" } else { "False" }
    )
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// An append-only CSV file of generated items.
#[derive(Debug, Clone)]
pub struct TreasureLog {
    path: PathBuf,
}

impl TreasureLog {
    /// A log at `path`. Nothing is touched until the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one item, creating the file (with a header) and its parent
    /// directories if needed.
    pub fn append(&self, summary: &ItemSummary) -> RenderResult<()> {
        let io_err = |source| RenderError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let is_new = !self.path.exists();

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;
        if is_new {
            debug!(path = %self.path.display(), "creating treasure log");
            writeln!(file, "{CSV_HEADER}").map_err(io_err)?;
        }
        file.write_all(csv_row(summary).as_bytes()).map_err(io_err)?;
        info!(path = %self.path.display(), item = %summary.name, "saved item to treasure log");
        Ok(())
    }
}

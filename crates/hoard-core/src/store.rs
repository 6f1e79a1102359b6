//! Directory-backed loot table storage.
//!
//! Each loot table is a `.json` file in one directory. Names may be given with
//! or without the extension.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::definition::LootDefinition;
use crate::error::{StoreError, StoreResult};

/// File name of the canonical table, listed first when present.
pub const DEFAULT_TABLE: &str = "default.json";

const EXTENSION: &str = "json";

/// Loads loot table definitions from a directory.
#[derive(Debug, Clone)]
pub struct TableStore {
    dir: PathBuf,
}

impl TableStore {
    /// Create a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory this store reads from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Names of all loadable tables, with [`DEFAULT_TABLE`] first.
    ///
    /// The rest are sorted by name. A missing directory yields just the
    /// default name, so callers always have something to offer.
    pub fn list_available(&self) -> Vec<String> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = %self.dir.display(), error = %e, "loot table directory not readable");
                return vec![DEFAULT_TABLE.to_string()];
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == EXTENSION))
            .filter_map(|e| e.file_name().into_string().ok())
            .collect();
        names.sort();

        if let Some(pos) = names.iter().position(|n| n == DEFAULT_TABLE) {
            let default = names.remove(pos);
            names.insert(0, default);
        }
        names
    }

    /// The file path a table name maps to.
    pub fn path_for(&self, name: &str) -> StoreResult<PathBuf> {
        let trimmed = name.trim();
        if trimmed.is_empty()
            || trimmed.contains(['/', '\\'])
            || trimmed == "."
            || trimmed == ".."
        {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        let file = if Path::new(trimmed)
            .extension()
            .is_some_and(|ext| ext == EXTENSION)
        {
            trimmed.to_string()
        } else {
            format!("{trimmed}.{EXTENSION}")
        };
        Ok(self.dir.join(file))
    }

    /// Load and parse the named table.
    pub fn load(&self, name: &str) -> StoreResult<LootDefinition> {
        let path = self.path_for(name)?;
        let text = std::fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => StoreError::NotFound {
                name: name.to_string(),
                path: path.clone(),
            },
            _ => StoreError::Io {
                name: name.to_string(),
                source,
            },
        })?;

        let definition =
            LootDefinition::from_json(&text).map_err(|source| StoreError::MalformedData {
                name: name.to_string(),
                source,
            })?;
        info!(table = name, path = %path.display(), "loaded loot table");
        Ok(definition)
    }
}

use std::path::PathBuf;

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur when loading a loot table definition.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No file backs the requested table name.
    #[error("loot table not found: {name} (looked in {})", path.display())]
    NotFound {
        /// The requested table name.
        name: String,
        /// The path that was checked.
        path: PathBuf,
    },

    /// The file exists but does not hold a valid loot table definition.
    #[error("malformed loot table \"{name}\": {source}")]
    MalformedData {
        /// The requested table name.
        name: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The table name would escape the store directory.
    #[error("invalid loot table name: \"{0}\"")]
    InvalidName(String),

    /// The file could not be read for a reason other than being absent.
    #[error("cannot read loot table \"{name}\": {source}")]
    Io {
        /// The requested table name.
        name: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

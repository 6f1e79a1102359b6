//! Error types for rendering and persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors from writing or serializing output.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The treasure log could not be written.
    #[error("failed to write treasure log {}: {source}", path.display())]
    Io {
        /// The log file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A report could not be serialized.
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

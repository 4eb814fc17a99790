//! Error types for the synchronization engine.

use std::path::PathBuf;

/// Boxed error raised by a collaborator (driver, filesystem, ...).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while applying or exporting scripts.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// A single statement was rejected by the database.
    #[error("{0}")]
    Statement(String),

    /// The scripts directory does not exist or is not a directory.
    #[error("Scripts directory not found: {0}")]
    ScriptsDirNotFound(PathBuf),

    /// A script file could not be read.
    #[error("Failed to read script '{path}': {source}")]
    ScriptRead {
        /// Path to the script file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A catalog query failed or returned rows of an unexpected shape.
    #[error("Catalog query '{query}' failed: {message}")]
    Catalog {
        /// Name of the catalog query.
        query: &'static str,
        /// Error message.
        message: String,
    },

    /// IO error (writing scripts, creating directories).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error raised by a backend collaborator.
    #[error("{0}")]
    Backend(BoxError),
}

impl SyncError {
    /// Wraps a collaborator error.
    pub fn backend(err: impl Into<BoxError>) -> Self {
        Self::Backend(err.into())
    }
}

/// Result type for synchronization operations.
pub type Result<T> = std::result::Result<T, SyncError>;

//! Error types for the command layer.

use std::path::PathBuf;

use dbmeta_core::error::SyncError;

/// Errors that abort a whole build, update or export.
#[derive(Debug, thiserror::Error)]
pub enum DbMetaError {
    /// Database error (connecting, creating, querying the catalog).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO error (creating directories, removing an old database file).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error raised by the synchronization engine.
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// The connection string could not be understood.
    #[error("Invalid connection string '{0}'")]
    InvalidConnectionString(String),

    /// The scripts directory does not exist.
    #[error("Scripts directory not found: {0}")]
    ScriptsDirNotFound(PathBuf),
}

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, DbMetaError>;

//! Build, update and export database schemas as plain SQL scripts.
//!
//! `dbmeta` wires the [`dbmeta_core`] engine to a `sqlx` database and the
//! filesystem:
//!
//! - **build-db** creates a fresh database and applies a scripts directory
//!   statement by statement;
//! - **update-db** applies a scripts directory to an existing database, one
//!   transaction per script;
//! - **export-scripts** reads the SQLite catalog and writes `domains.sql`,
//!   `tables.sql` and `procedures.sql` in a form `build-db` accepts.
//!
//! # CLI Usage
//!
//! ```bash
//! dbmeta build-db --db-dir ./db --scripts-dir ./scripts
//! dbmeta export-scripts --connection-string ./db/database.db --output-dir ./out
//! dbmeta update-db --connection-string ./db/database.db --scripts-dir ./scripts
//! ```

pub mod catalog;
pub mod commands;
pub mod config;
pub mod dialect;
pub mod error;
pub mod executor;
pub mod fs;

pub use commands::{build_database, export_scripts, update_database};
pub use config::ConnectionSettings;
pub use dialect::SqliteDialect;
pub use error::{DbMetaError, Result};

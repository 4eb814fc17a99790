//! Connection settings.
//!
//! Accepts three spellings of a connection string:
//!
//! - an `sqlite:` URL (`sqlite:app.db?mode=rwc`, `sqlite::memory:`);
//! - a `key=value;` list whose `Database` entry names the database file
//!   (`User=SYSDBA;Password=masterkey;Database=/data/app.db;`), other keys
//!   are ignored;
//! - a bare file path.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::debug;

use crate::error::{DbMetaError, Result};

/// File name of the database created by `build-db`.
pub const DATABASE_FILE: &str = "database.db";

/// Key naming the database file in a `key=value;` connection string.
const DATABASE_KEY: &str = "database";

/// Parsed connection settings.
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    options: SqliteConnectOptions,
    target: String,
    path: Option<PathBuf>,
}

impl ConnectionSettings {
    /// Parses a connection string.
    pub fn parse(connection: &str) -> Result<Self> {
        let connection = connection.trim();
        if connection.is_empty() {
            return Err(DbMetaError::InvalidConnectionString(connection.to_string()));
        }

        if connection.starts_with("sqlite:") {
            let options = SqliteConnectOptions::from_str(connection)
                .map_err(|_| DbMetaError::InvalidConnectionString(connection.to_string()))?;
            return Ok(Self {
                options,
                target: connection.to_string(),
                path: None,
            });
        }

        if connection.contains('=') {
            let path = database_entry(connection)
                .ok_or_else(|| DbMetaError::InvalidConnectionString(connection.to_string()))?;
            return Ok(Self::from_path(path));
        }

        Ok(Self::from_path(connection))
    }

    /// Settings for a database file.
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self {
            options: SqliteConnectOptions::new().filename(path),
            target: path.display().to_string(),
            path: Some(path.to_path_buf()),
        }
    }

    /// Settings for a fresh database file inside `db_dir`.
    #[must_use]
    pub fn new_database(db_dir: &Path) -> Self {
        Self::from_path(db_dir.join(DATABASE_FILE)).create_if_missing(true)
    }

    /// Creates the database file on connect when it does not exist.
    #[must_use]
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.options = self.options.create_if_missing(create);
        self
    }

    /// Human-readable connection target (path or URL).
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Path of the database file, when given as a path rather than a URL.
    #[must_use]
    pub fn database_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Opens a single-connection pool. Statements are applied strictly one
    /// at a time, so more connections are never needed.
    pub async fn connect(&self) -> Result<SqlitePool> {
        debug!(connection = %self.target, "Connecting");
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(self.options.clone())
            .await?;
        Ok(pool)
    }
}

/// Extracts the `Database` entry of a `key=value;` list.
fn database_entry(connection: &str) -> Option<&str> {
    connection
        .split(';')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case(DATABASE_KEY))
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_path() {
        let settings = ConnectionSettings::parse("/data/app.db").unwrap();
        assert_eq!(settings.target(), "/data/app.db");
        assert_eq!(settings.database_path(), Some(Path::new("/data/app.db")));
    }

    #[test]
    fn test_parse_key_value_list() {
        let settings = ConnectionSettings::parse(
            "User=SYSDBA;Password=masterkey;Database=/data/app.db;DataSource=localhost;",
        )
        .unwrap();
        assert_eq!(settings.database_path(), Some(Path::new("/data/app.db")));
    }

    #[test]
    fn test_parse_key_value_without_database() {
        let result = ConnectionSettings::parse("User=SYSDBA;Password=masterkey");
        assert!(matches!(
            result,
            Err(DbMetaError::InvalidConnectionString(_))
        ));
    }

    #[test]
    fn test_parse_empty() {
        assert!(ConnectionSettings::parse("   ").is_err());
    }

    #[test]
    fn test_parse_url() {
        let settings = ConnectionSettings::parse("sqlite://data/app.db").unwrap();
        assert_eq!(settings.target(), "sqlite://data/app.db");
        assert!(settings.database_path().is_none());
    }

    #[test]
    fn test_new_database_path() {
        let settings = ConnectionSettings::new_database(Path::new("/tmp/db"));
        assert_eq!(
            settings.database_path(),
            Some(Path::new("/tmp/db").join(DATABASE_FILE).as_path())
        );
    }

    #[tokio::test]
    async fn test_connect_in_memory() {
        let settings = ConnectionSettings::parse("sqlite::memory:").unwrap();
        let pool = settings.connect().await.unwrap();
        let row: (i64,) = sqlx::query_as("SELECT 1").fetch_one(&pool).await.unwrap();
        assert_eq!(row.0, 1);
    }
}

//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use dbmeta::ConnectionSettings;
use sqlx::sqlite::SqlitePool;

/// Writes `files` into `dir` and returns `dir`.
pub fn write_scripts(dir: &Path, files: &[(&str, &str)]) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    for (name, text) in files {
        std::fs::write(dir.join(name), text).unwrap();
    }
    dir.to_path_buf()
}

/// Opens an existing database file.
pub async fn open(path: &Path) -> SqlitePool {
    ConnectionSettings::from_path(path).connect().await.unwrap()
}

/// Counts the rows of `table`.
pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    let row: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap();
    row.0
}

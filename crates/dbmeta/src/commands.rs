//! The `build-db`, `update-db` and `export-scripts` operations.

use std::path::{Path, PathBuf};

use tracing::info;

use dbmeta_core::ddl::export_catalog;
use dbmeta_core::prelude::*;

use crate::catalog::SqliteCatalog;
use crate::config::ConnectionSettings;
use crate::dialect::SqliteDialect;
use crate::error::{DbMetaError, Result};
use crate::executor::SqliteExecutor;
use crate::fs::{FsScriptSink, FsScriptSource};

fn ensure_scripts_dir(scripts_dir: &Path) -> Result<()> {
    if scripts_dir.is_dir() {
        Ok(())
    } else {
        Err(DbMetaError::ScriptsDirNotFound(scripts_dir.to_path_buf()))
    }
}

/// Creates a fresh database in `db_dir` and applies the scripts of
/// `scripts_dir` in build mode. An existing database file is replaced.
pub async fn build_database(db_dir: &Path, scripts_dir: &Path) -> Result<ExecutionReport> {
    ensure_scripts_dir(scripts_dir)?;
    tokio::fs::create_dir_all(db_dir).await?;

    let settings = ConnectionSettings::new_database(db_dir);
    if let Some(path) = settings.database_path() {
        if tokio::fs::try_exists(path).await? {
            info!(path = %path.display(), "Removing existing database");
            tokio::fs::remove_file(path).await?;
        }
    }

    info!(database = %settings.target(), "Creating database");
    let pool = settings.connect().await?;

    let mut runner = ScriptRunner::new(SqliteExecutor::new(pool.clone()), RunMode::Build);
    let report = runner.run_dir(&FsScriptSource, scripts_dir).await?;

    pool.close().await;
    Ok(report)
}

/// Applies the scripts of `scripts_dir` to an existing database in update
/// mode (one transaction per script).
pub async fn update_database(
    settings: &ConnectionSettings,
    scripts_dir: &Path,
) -> Result<ExecutionReport> {
    ensure_scripts_dir(scripts_dir)?;

    info!(database = %settings.target(), "Updating database");
    let pool = settings.connect().await?;

    let mut runner = ScriptRunner::new(SqliteExecutor::new(pool.clone()), RunMode::Update);
    let report = runner.run_dir(&FsScriptSource, scripts_dir).await?;

    pool.close().await;
    Ok(report)
}

/// Reads the catalog of a database and writes `domains.sql`, `tables.sql`
/// and `procedures.sql` into `output_dir`. Returns the written paths.
pub async fn export_scripts(
    settings: &ConnectionSettings,
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    info!(database = %settings.target(), "Exporting catalog");
    let pool = settings.connect().await?;

    let mut catalog = SqliteCatalog::new(pool.clone());
    let exported = export_catalog(&mut catalog, &SqliteDialect).await?;
    pool.close().await;

    let mut written = Vec::new();
    for (category, text) in exported.scripts() {
        let Some(name) = category.file_name() else {
            continue;
        };
        let path = FsScriptSink.write_script(output_dir, name, text).await?;
        info!(path = %path.display(), "Exported");
        written.push(path);
    }
    Ok(written)
}

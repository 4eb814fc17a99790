//! Filesystem script source and sink.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use dbmeta_core::error::{Result, SyncError};
use dbmeta_core::script::{ScriptSink, ScriptSource};

/// Extension of script files.
pub const SCRIPT_EXTENSION: &str = "sql";

/// Reads `*.sql` scripts from a directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsScriptSource;

#[async_trait]
impl ScriptSource for FsScriptSource {
    async fn list_scripts(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !fs::metadata(dir).await.is_ok_and(|m| m.is_dir()) {
            return Err(SyncError::ScriptsDirNotFound(dir.to_path_buf()));
        }

        let mut entries = fs::read_dir(dir).await?;
        let mut scripts = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_script = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(SCRIPT_EXTENSION));
            if is_script && entry.file_type().await?.is_file() {
                scripts.push(path);
            }
        }
        debug!(dir = %dir.display(), scripts = scripts.len(), "Listed scripts");
        Ok(scripts)
    }

    async fn read_script(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .await
            .map_err(|source| SyncError::ScriptRead {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Writes scripts into a directory, creating it when missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsScriptSink;

#[async_trait]
impl ScriptSink for FsScriptSink {
    async fn write_script(&self, dir: &Path, name: &str, text: &str) -> Result<PathBuf> {
        fs::create_dir_all(dir).await?;
        let path = dir.join(name);
        fs::write(&path, text).await?;
        debug!(path = %path.display(), bytes = text.len(), "Wrote script");
        Ok(path)
    }
}

//! Statement executor over a `sqlx` SQLite pool.
//!
//! Outside a transaction each statement autocommits on the pool. Between
//! [`StatementExecutor::begin`] and commit/rollback, statements run on the
//! open transaction.

use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use sqlx::{Sqlite, Transaction};
use tracing::debug;

use dbmeta_core::error::{Result, SyncError};
use dbmeta_core::runner::StatementExecutor;

/// Executes script statements against a database.
pub struct SqliteExecutor {
    pool: SqlitePool,
    tx: Option<Transaction<'static, Sqlite>>,
}

impl SqliteExecutor {
    /// Creates a new executor.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool, tx: None }
    }

    /// Returns whether a transaction is open.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.tx.is_some()
    }
}

#[async_trait]
impl StatementExecutor for SqliteExecutor {
    async fn execute(&mut self, statement: &str) -> Result<()> {
        debug!(sql = %statement.trim_end(), "Executing SQL");
        let result = match self.tx.as_mut() {
            Some(tx) => sqlx::query(statement).execute(&mut **tx).await,
            None => sqlx::query(statement).execute(&self.pool).await,
        };
        result.map(|_| ()).map_err(SyncError::backend)
    }

    async fn begin(&mut self) -> Result<()> {
        if self.tx.is_some() {
            return Err(SyncError::Statement(
                "a transaction is already open".to_string(),
            ));
        }
        let tx = self.pool.begin().await.map_err(SyncError::backend)?;
        self.tx = Some(tx);
        Ok(())
    }

    async fn commit(&mut self) -> Result<()> {
        match self.tx.take() {
            Some(tx) => tx.commit().await.map_err(SyncError::backend),
            None => Ok(()),
        }
    }

    async fn rollback(&mut self) -> Result<()> {
        match self.tx.take() {
            Some(tx) => tx.rollback().await.map_err(SyncError::backend),
            None => Ok(()),
        }
    }
}

//! Script runner.
//!
//! Applies a directory of scripts in dependency order through a
//! [`StatementExecutor`]. Individual statement or script failures never
//! abort the run; they are collected into the returned [`ExecutionReport`].
//! Only failing to enumerate or read the scripts is fatal.

use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::report::ExecutionReport;
use crate::script::{file_name, sort_scripts, ScriptFile, ScriptSource};
use crate::segment::split_statements;

/// Executes statements against a database connection.
#[async_trait]
pub trait StatementExecutor: Send {
    /// Executes one statement, inside the open transaction if there is one.
    async fn execute(&mut self, statement: &str) -> Result<()>;

    /// Opens a transaction.
    async fn begin(&mut self) -> Result<()>;

    /// Commits the open transaction.
    async fn commit(&mut self) -> Result<()>;

    /// Rolls back the open transaction.
    async fn rollback(&mut self) -> Result<()>;
}

/// How scripts are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunMode {
    /// Autocommit; a failing statement is skipped and the script continues.
    Build,
    /// One transaction per script; a failing statement rolls the script back.
    Update,
}

/// Applies scripts through an executor.
pub struct ScriptRunner<E: StatementExecutor> {
    executor: E,
    mode: RunMode,
}

impl<E: StatementExecutor> ScriptRunner<E> {
    /// Creates a new runner.
    pub const fn new(executor: E, mode: RunMode) -> Self {
        Self { executor, mode }
    }

    /// Returns the executor.
    #[must_use]
    pub const fn executor(&self) -> &E {
        &self.executor
    }

    /// Consumes the runner and returns the executor.
    pub fn into_inner(self) -> E {
        self.executor
    }

    /// Applies every `*.sql` script of `dir` in application order.
    pub async fn run_dir<S: ScriptSource + ?Sized>(
        &mut self,
        source: &S,
        dir: &Path,
    ) -> Result<ExecutionReport> {
        let mut paths = source.list_scripts(dir).await?;
        sort_scripts(&mut paths);
        info!(
            dir = %dir.display(),
            scripts = paths.len(),
            mode = ?self.mode,
            "Applying scripts"
        );

        let mut report = ExecutionReport::new();
        for path in &paths {
            let text = source.read_script(path).await?;
            let script = ScriptFile::new(file_name(path), text);
            self.run_script(&script, &mut report).await;
        }
        Ok(report)
    }

    /// Applies already-loaded scripts in the given order.
    pub async fn run_scripts(&mut self, scripts: &[ScriptFile]) -> ExecutionReport {
        let mut report = ExecutionReport::new();
        for script in scripts {
            self.run_script(script, &mut report).await;
        }
        report
    }

    /// Applies one script, recording its outcome into `report`.
    pub async fn run_script(&mut self, script: &ScriptFile, report: &mut ExecutionReport) {
        let statements = executable_statements(script);
        debug!(
            script = %script.name,
            statements = statements.len(),
            "Running script"
        );

        let clean = match self.mode {
            RunMode::Build => self.run_autocommit(script, &statements, report).await,
            RunMode::Update => self.run_transactional(script, &statements, report).await,
        };

        if clean {
            info!("OK: {}", script.name);
            report.record_ok(&script.name);
        }
    }

    async fn run_autocommit(
        &mut self,
        script: &ScriptFile,
        statements: &[String],
        report: &mut ExecutionReport,
    ) -> bool {
        let mut clean = true;
        for (idx, statement) in statements.iter().enumerate() {
            if let Err(e) = self.executor.execute(statement).await {
                warn!(
                    script = %script.name,
                    statement = idx + 1,
                    error = %e,
                    "Statement failed"
                );
                report.record_error(&script.name, e.to_string());
                clean = false;
            }
        }
        clean
    }

    async fn run_transactional(
        &mut self,
        script: &ScriptFile,
        statements: &[String],
        report: &mut ExecutionReport,
    ) -> bool {
        if let Err(e) = self.executor.begin().await {
            warn!(script = %script.name, error = %e, "Failed to open transaction");
            report.record_error(&script.name, e.to_string());
            return false;
        }

        for (idx, statement) in statements.iter().enumerate() {
            if let Err(e) = self.executor.execute(statement).await {
                warn!(
                    script = %script.name,
                    statement = idx + 1,
                    error = %e,
                    "Statement failed, rolling back script"
                );
                report.record_error(&script.name, e.to_string());
                if let Err(rollback_err) = self.executor.rollback().await {
                    warn!(script = %script.name, error = %rollback_err, "Rollback failed");
                }
                return false;
            }
        }

        if let Err(e) = self.executor.commit().await {
            warn!(script = %script.name, error = %e, "Commit failed");
            report.record_error(&script.name, e.to_string());
            return false;
        }
        true
    }
}

/// Segments a script and drops whitespace-only statements.
#[must_use]
pub fn executable_statements(script: &ScriptFile) -> Vec<String> {
    split_statements(&script.text, script.category)
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .collect()
}

//! Execution report.

use std::fmt;

use serde::Serialize;

/// Failures recorded for one script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptFailure {
    /// Script file name.
    pub script: String,
    /// Error messages, in the order they occurred.
    pub messages: Vec<String>,
}

/// Outcome of one build or update run.
///
/// Scripts appear in the order they were applied. An empty failure list
/// means every statement succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionReport {
    applied: Vec<String>,
    failures: Vec<ScriptFailure>,
}

impl ExecutionReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a script that completed without errors.
    pub fn record_ok(&mut self, script: impl Into<String>) {
        self.applied.push(script.into());
    }

    /// Records an error for a script.
    pub fn record_error(&mut self, script: &str, message: impl Into<String>) {
        let message = message.into();
        match self.failures.iter_mut().find(|f| f.script == script) {
            Some(failure) => failure.messages.push(message),
            None => self.failures.push(ScriptFailure {
                script: script.to_string(),
                messages: vec![message],
            }),
        }
    }

    /// Returns whether no errors were recorded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Scripts that completed cleanly.
    #[must_use]
    pub fn applied(&self) -> &[String] {
        &self.applied
    }

    /// Scripts with at least one error.
    #[must_use]
    pub fn failures(&self) -> &[ScriptFailure] {
        &self.failures
    }

    /// Errors recorded for one script.
    #[must_use]
    pub fn errors_for(&self, script: &str) -> &[String] {
        self.failures
            .iter()
            .find(|f| f.script == script)
            .map(|f| f.messages.as_slice())
            .unwrap_or_default()
    }

    /// Total number of recorded errors.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.failures.iter().map(|f| f.messages.len()).sum()
    }

    /// Itemized `{script} -> {message}` lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.failures
            .iter()
            .flat_map(|f| f.messages.iter().map(move |m| format!("{} -> {}", f.script, m)))
            .collect()
    }
}

impl fmt::Display for ExecutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, " - {line}")?;
        }
        Ok(())
    }
}

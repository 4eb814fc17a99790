//! Script files, their categories and application order.
//!
//! Scripts are applied in dependency order: domains before the tables that
//! reference them, tables before the procedures that query them. The order
//! is keyed on the file name only.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::Result;

/// Classification of a script file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptCategory {
    /// `domains.sql`.
    Domains,
    /// `tables.sql`.
    Tables,
    /// `procedures.sql`.
    Procedures,
    /// Any other `*.sql` file.
    Other,
}

/// Well-known script names in the order they must be applied.
pub const SCRIPT_ORDER: [(&str, ScriptCategory); 3] = [
    ("domains.sql", ScriptCategory::Domains),
    ("tables.sql", ScriptCategory::Tables),
    ("procedures.sql", ScriptCategory::Procedures),
];

impl ScriptCategory {
    /// Classifies a script by file name (case-insensitive).
    #[must_use]
    pub fn from_file_name(name: &str) -> Self {
        SCRIPT_ORDER
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(name))
            .map_or(Self::Other, |(_, category)| *category)
    }

    /// File name used when this category is exported.
    #[must_use]
    pub const fn file_name(self) -> Option<&'static str> {
        match self {
            Self::Domains => Some("domains.sql"),
            Self::Tables => Some("tables.sql"),
            Self::Procedures => Some("procedures.sql"),
            Self::Other => None,
        }
    }

    /// Application rank: 1-based position in [`SCRIPT_ORDER`], `usize::MAX` otherwise.
    #[must_use]
    pub fn rank(self) -> usize {
        SCRIPT_ORDER
            .iter()
            .position(|(_, category)| *category == self)
            .map_or(usize::MAX, |idx| idx + 1)
    }
}

/// Compares two script file names by application order.
#[must_use]
pub fn compare_script_names(a: &str, b: &str) -> Ordering {
    ScriptCategory::from_file_name(a)
        .rank()
        .cmp(&ScriptCategory::from_file_name(b).rank())
        .then_with(|| a.cmp(b))
}

/// Sorts script paths into application order.
pub fn sort_scripts(paths: &mut [PathBuf]) {
    paths.sort_by(|a, b| compare_script_names(&file_name(a), &file_name(b)));
}

/// Returns the final path component as a string (empty when absent).
#[must_use]
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// A script read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptFile {
    /// File name, used as the report key.
    pub name: String,
    /// Category derived from the file name.
    pub category: ScriptCategory,
    /// Raw text.
    pub text: String,
}

impl ScriptFile {
    /// Creates a script, classifying it by name.
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        let name = name.into();
        let category = ScriptCategory::from_file_name(&name);
        Self {
            name,
            category,
            text: text.into(),
        }
    }
}

/// Where scripts are read from.
#[async_trait]
pub trait ScriptSource: Send + Sync {
    /// Lists the `*.sql` files of a directory, in any order.
    async fn list_scripts(&self, dir: &Path) -> Result<Vec<PathBuf>>;

    /// Reads the full text of a script.
    async fn read_script(&self, path: &Path) -> Result<String>;
}

/// Where exported scripts are written to.
#[async_trait]
pub trait ScriptSink: Send + Sync {
    /// Creates `dir` if needed and writes `text` to `dir/name`, overwriting.
    async fn write_script(&self, dir: &Path, name: &str, text: &str) -> Result<PathBuf>;
}

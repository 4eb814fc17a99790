//! DDL dialects.
//!
//! Exported scripts are meant to be applied again on the engine they were
//! read from. The rendering is shared; a dialect only supplies the pieces
//! whose syntax differs between engines.

/// Engine-specific pieces of generated DDL.
pub trait DdlDialect: Send + Sync {
    /// Returns the dialect name.
    fn name(&self) -> &'static str;

    /// Clause appended to the type of an identity column.
    fn identity_clause(&self) -> &'static str;
}

/// Firebird syntax: the canonical export format.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirebirdDialect;

impl DdlDialect for FirebirdDialect {
    fn name(&self) -> &'static str {
        "firebird"
    }

    fn identity_clause(&self) -> &'static str {
        "GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY"
    }
}

//! SQLite dialect for exported DDL.
//!
//! SQLite has no domains or stored procedures, so only tables differ from
//! the canonical format: identity columns become `AUTOINCREMENT` keys.

use dbmeta_core::dialect::DdlDialect;

/// SQLite export dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

impl DdlDialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn identity_clause(&self) -> &'static str {
        "PRIMARY KEY AUTOINCREMENT"
    }
}

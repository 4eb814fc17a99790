//! Catalog reader over the SQLite schema.
//!
//! Tables come from `sqlite_master`, columns and foreign keys from the
//! `pragma_table_info` and `pragma_foreign_key_list` table-valued functions.
//! Each query has a row tuple type and a single `into_*` adapter that turns
//! the row into a catalog record. Declared column types are folded back into
//! field-type codes by [`parse_declared_type`], so a type written by an
//! export reads back as the same field type.
//!
//! SQLite has no domains or stored procedures; those lists are always empty.

use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use tracing::debug;

use dbmeta_core::catalog::{
    CatalogReader, Column, Domain, ForeignKey, Parameter, ParameterDirection, ProcedureHeader,
};
use dbmeta_core::error::{Result, SyncError};
use dbmeta_core::typemap::{codes, FieldType, MAX_ROW_TEXT_BYTES};

/// User tables, views and `sqlite_*` internals excluded.
pub const TABLES_SQL: &str = r"
SELECT name
FROM sqlite_master
WHERE type = 'table'
  AND name NOT LIKE 'sqlite\_%' ESCAPE '\'
ORDER BY name";

/// `CREATE TABLE` text of one table.
pub const TABLE_SQL: &str = r"
SELECT sql
FROM sqlite_master
WHERE type = 'table'
  AND name = ?";

/// Columns of one table in declaration order.
pub const COLUMNS_SQL: &str = r#"
SELECT name, type, "notnull", dflt_value, pk
FROM pragma_table_info(?)
ORDER BY cid"#;

/// Foreign-key segments of one table. A reference without an explicit
/// column targets the primary key of the referenced table. Constraint ids
/// count from the last declared constraint.
pub const FOREIGN_KEYS_SQL: &str = r#"
SELECT fk."from", fk."table", COALESCE(
    fk."to",
    (SELECT pk.name FROM pragma_table_info(fk."table") pk WHERE pk.pk = fk.seq + 1)
)
FROM pragma_foreign_key_list(?) fk
ORDER BY fk.id DESC, fk.seq"#;

/// Keyword marking the single identity column of a table.
const AUTOINCREMENT: &str = "AUTOINCREMENT";

/// Column type with no catalog counterpart.
const UNKNOWN_CODE: i16 = 0;

type ColumnRow = (String, String, i64, Option<String>, i64);

type ForeignKeyRow = (String, String, Option<String>);

/// Maps a declared SQLite column type onto a field type.
///
/// Covers every spelling [`dbmeta_core::typemap::map_type`] produces plus the
/// common SQLite affinities (`TEXT`, `REAL`, `DATETIME`...). Unrecognized
/// declarations map to code `0`.
#[must_use]
pub fn parse_declared_type(declared: &str) -> FieldType {
    let declared = declared.trim().to_ascii_uppercase();
    let (name, args) = match declared.split_once('(') {
        Some((name, rest)) => (name, type_arguments(rest)),
        None => (declared.as_str(), Vec::new()),
    };
    let name = name.split_whitespace().collect::<Vec<_>>().join(" ");

    match (name.as_str(), args.as_slice()) {
        ("SMALLINT" | "BOOLEAN", _) => FieldType::new(codes::SMALLINT),
        ("INTEGER" | "INT", _) => FieldType::new(codes::INTEGER),
        ("BIGINT", _) | ("NUMERIC" | "DECIMAL", []) => FieldType::new(codes::INT64),
        ("NUMERIC" | "DECIMAL", [precision, rest @ ..]) => {
            let scale = rest.first().copied().unwrap_or(0);
            FieldType::new(codes::INT64).numeric(narrow(*precision), -narrow(scale))
        }
        ("QUAD", _) => FieldType::new(codes::QUAD),
        ("FLOAT", _) => FieldType::new(codes::FLOAT),
        ("DOUBLE PRECISION" | "DOUBLE" | "REAL", _) => FieldType::new(codes::DOUBLE),
        ("DATE", _) => FieldType::new(codes::DATE),
        ("TIME", _) => FieldType::new(codes::TIME),
        ("TIMESTAMP" | "DATETIME", _) => FieldType::new(codes::TIMESTAMP),
        ("CHAR" | "CHARACTER", [length, ..]) => FieldType::new(codes::CHAR).length(*length),
        ("CHAR" | "CHARACTER", []) => FieldType::new(codes::CHAR).length(1),
        ("VARCHAR" | "CHARACTER VARYING", [length, ..]) => {
            FieldType::new(codes::VARCHAR).length(*length)
        }
        ("BLOB SUB_TYPE TEXT" | "TEXT" | "CLOB" | "VARCHAR", _) => {
            FieldType::new(codes::VARCHAR).length(MAX_ROW_TEXT_BYTES + 1)
        }
        ("BLOB", _) => FieldType::new(codes::BLOB),
        ("UNKNOWN_TYPE", [code, ..]) => FieldType::new(narrow(*code)),
        _ => FieldType::new(UNKNOWN_CODE),
    }
}

/// Parses `18,2)` into `[18, 2]`, skipping anything that is not a number.
fn type_arguments(rest: &str) -> Vec<i32> {
    rest.trim_end()
        .trim_end_matches(')')
        .split(',')
        .filter_map(|arg| arg.trim().parse().ok())
        .collect()
}

fn narrow(value: i32) -> i16 {
    i16::try_from(value).unwrap_or(i16::MAX)
}

fn into_column(row: ColumnRow, autoincrement: bool) -> Column {
    let (name, declared, not_null, default, pk) = row;
    Column {
        name,
        field_source: String::new(),
        field: parse_declared_type(&declared),
        nullable: not_null == 0,
        default_source: default.map(|d| format!("DEFAULT {}", d.trim())),
        identity: autoincrement && pk == 1,
    }
}

fn into_foreign_key(row: ForeignKeyRow) -> Option<ForeignKey> {
    let (column, ref_table, ref_column) = row;
    Some(ForeignKey {
        column,
        ref_table,
        ref_column: ref_column?,
    })
}

fn catalog_error(query: &'static str) -> impl Fn(sqlx::Error) -> SyncError {
    move |e| SyncError::Catalog {
        query,
        message: e.to_string(),
    }
}

/// Reads catalog metadata through a pool.
pub struct SqliteCatalog {
    pool: SqlitePool,
}

impl SqliteCatalog {
    /// Creates a new catalog reader.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Whether the table was declared with an `AUTOINCREMENT` key. SQLite
    /// only accepts it on the single `INTEGER PRIMARY KEY` column.
    async fn has_autoincrement(&self, table: &str) -> Result<bool> {
        let row: Option<(Option<String>,)> = sqlx::query_as(TABLE_SQL)
            .bind(table)
            .fetch_optional(&self.pool)
            .await
            .map_err(catalog_error("table"))?;
        Ok(row
            .and_then(|(sql,)| sql)
            .is_some_and(|sql| sql.to_ascii_uppercase().contains(AUTOINCREMENT)))
    }
}

#[async_trait]
impl CatalogReader for SqliteCatalog {
    async fn domains(&mut self) -> Result<Vec<Domain>> {
        Ok(Vec::new())
    }

    async fn tables(&mut self) -> Result<Vec<String>> {
        let rows: Vec<(String,)> = sqlx::query_as(TABLES_SQL)
            .fetch_all(&self.pool)
            .await
            .map_err(catalog_error("tables"))?;
        debug!(rows = rows.len(), "Read tables");
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    async fn columns(&mut self, table: &str) -> Result<Vec<Column>> {
        let autoincrement = self.has_autoincrement(table).await?;
        let rows: Vec<ColumnRow> = sqlx::query_as(COLUMNS_SQL)
            .bind(table)
            .fetch_all(&self.pool)
            .await
            .map_err(catalog_error("columns"))?;
        Ok(rows
            .into_iter()
            .map(|row| into_column(row, autoincrement))
            .collect())
    }

    async fn foreign_keys(&mut self, table: &str) -> Result<Vec<ForeignKey>> {
        let rows: Vec<ForeignKeyRow> = sqlx::query_as(FOREIGN_KEYS_SQL)
            .bind(table)
            .fetch_all(&self.pool)
            .await
            .map_err(catalog_error("foreign_keys"))?;
        Ok(rows.into_iter().filter_map(into_foreign_key).collect())
    }

    async fn procedures(&mut self) -> Result<Vec<ProcedureHeader>> {
        Ok(Vec::new())
    }

    async fn parameters(
        &mut self,
        _procedure: &str,
        _direction: ParameterDirection,
    ) -> Result<Vec<Parameter>> {
        Ok(Vec::new())
    }
}

//! DDL generation from catalog metadata.
//!
//! Produces the three export scripts (`domains.sql`, `tables.sql`,
//! `procedures.sql`) in the same line-oriented form the segmenter splits,
//! so an exported script can be applied again as-is. Engine-specific syntax
//! comes from a [`DdlDialect`].

use tracing::debug;

use crate::catalog::{
    is_system_name, CatalogReader, Column, Domain, ForeignKey, Parameter, ParameterDirection,
    Procedure, ProcedureHeader, Table,
};
use crate::dialect::DdlDialect;
use crate::error::Result;
use crate::script::ScriptCategory;
use crate::typemap::map_type;

/// Indentation of column and constraint entries.
const INDENT: &str = "    ";

/// The three scripts produced by an export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportedScripts {
    /// `CREATE DOMAIN` statements.
    pub domains: String,
    /// `CREATE TABLE` statements.
    pub tables: String,
    /// `CREATE OR ALTER PROCEDURE` statements.
    pub procedures: String,
}

impl ExportedScripts {
    /// Scripts paired with their category, in application order.
    #[must_use]
    pub fn scripts(&self) -> [(ScriptCategory, &str); 3] {
        [
            (ScriptCategory::Domains, self.domains.as_str()),
            (ScriptCategory::Tables, self.tables.as_str()),
            (ScriptCategory::Procedures, self.procedures.as_str()),
        ]
    }
}

/// Walks the whole catalog and renders the export scripts.
pub async fn export_catalog<R: CatalogReader + ?Sized>(
    reader: &mut R,
    dialect: &dyn DdlDialect,
) -> Result<ExportedScripts> {
    Ok(ExportedScripts {
        domains: domains_script(reader).await?,
        tables: tables_script(reader, dialect).await?,
        procedures: procedures_script(reader).await?,
    })
}

/// Renders `domains.sql`.
pub async fn domains_script<R: CatalogReader + ?Sized>(reader: &mut R) -> Result<String> {
    let mut out = String::new();
    for domain in reader.domains().await? {
        if let Some(line) = render_domain(&domain) {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out.push('\n');
    Ok(out)
}

/// Renders `tables.sql`.
pub async fn tables_script<R: CatalogReader + ?Sized>(
    reader: &mut R,
    dialect: &dyn DdlDialect,
) -> Result<String> {
    let mut out = String::new();
    for name in reader.tables().await? {
        let table = load_table(reader, &name).await?;
        out.push_str(&render_table(&table, dialect));
        out.push('\n');
    }
    Ok(out)
}

/// Renders `procedures.sql`.
pub async fn procedures_script<R: CatalogReader + ?Sized>(reader: &mut R) -> Result<String> {
    let mut out = String::new();
    for header in reader.procedures().await? {
        if let Some(procedure) = load_procedure(reader, header).await? {
            out.push_str(&render_procedure(&procedure));
            out.push('\n');
        }
    }
    Ok(out)
}

/// Reads one table with its columns and foreign keys.
pub async fn load_table<R: CatalogReader + ?Sized>(reader: &mut R, name: &str) -> Result<Table> {
    let columns = reader.columns(name).await?;
    let foreign_keys = reader.foreign_keys(name).await?;
    debug!(
        table = %name,
        columns = columns.len(),
        foreign_keys = foreign_keys.len(),
        "Loaded table"
    );
    Ok(Table {
        name: name.to_string(),
        columns,
        foreign_keys,
    })
}

/// Reads a procedure's parameters. Returns `None` for procedures without
/// body source, which cannot be re-created.
pub async fn load_procedure<R: CatalogReader + ?Sized>(
    reader: &mut R,
    header: ProcedureHeader,
) -> Result<Option<Procedure>> {
    let source = header.source.as_deref().map(str::trim).unwrap_or_default();
    if source.is_empty() {
        debug!(procedure = %header.name, "Skipping procedure without source");
        return Ok(None);
    }

    let inputs = reader
        .parameters(&header.name, ParameterDirection::Input)
        .await?;
    let outputs = reader
        .parameters(&header.name, ParameterDirection::Output)
        .await?;

    Ok(Some(Procedure {
        source: source.to_string(),
        name: header.name,
        inputs,
        outputs,
    }))
}

/// Renders `CREATE DOMAIN`, or `None` for system-generated fields.
#[must_use]
pub fn render_domain(domain: &Domain) -> Option<String> {
    if is_system_name(&domain.name) {
        return None;
    }
    Some(format!(
        "CREATE DOMAIN {} AS {};",
        domain.name,
        map_type(&domain.field)
    ))
}

/// Renders one column entry (indented, without trailing comma).
#[must_use]
pub fn render_column(column: &Column, dialect: &dyn DdlDialect) -> String {
    let mut line = format!("{INDENT}{} ", column.name);

    match column.domain() {
        Some(domain) => line.push_str(domain),
        None => line.push_str(&map_type(&column.field)),
    }

    if column.identity {
        line.push(' ');
        line.push_str(dialect.identity_clause());
    } else {
        if let Some(default) = column.default_source.as_deref().map(str::trim) {
            if !default.is_empty() {
                line.push(' ');
                line.push_str(default);
            }
        }
        if !column.nullable {
            line.push_str(" NOT NULL");
        }
    }

    line
}

/// Renders one foreign-key entry.
#[must_use]
pub fn render_foreign_key(fk: &ForeignKey) -> String {
    format!(
        "{INDENT}FOREIGN KEY ({}) REFERENCES {}({})",
        fk.column, fk.ref_table, fk.ref_column
    )
}

/// Renders a `CREATE TABLE` statement followed by a newline.
#[must_use]
pub fn render_table(table: &Table, dialect: &dyn DdlDialect) -> String {
    let entries: Vec<String> = table
        .columns
        .iter()
        .map(|column| render_column(column, dialect))
        .chain(table.foreign_keys.iter().map(render_foreign_key))
        .collect();

    format!("CREATE TABLE {} (\n{}\n);\n", table.name, entries.join(",\n"))
}

/// Renders a parameter list as `NAME TYPE, NAME TYPE`.
#[must_use]
pub fn render_parameters(params: &[Parameter]) -> String {
    params
        .iter()
        .map(|p| format!("{} {}", p.name, map_type(&p.field)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders a `CREATE OR ALTER PROCEDURE` statement followed by a newline.
#[must_use]
pub fn render_procedure(procedure: &Procedure) -> String {
    let mut out = format!("CREATE OR ALTER PROCEDURE {}\n", procedure.name);
    if !procedure.inputs.is_empty() {
        out.push_str(&format!("({})\n", render_parameters(&procedure.inputs)));
    }
    if !procedure.outputs.is_empty() {
        out.push_str(&format!(
            "RETURNS ({})\n",
            render_parameters(&procedure.outputs)
        ));
    }
    out.push_str("AS\n");
    out.push_str(&procedure.source);
    out.push_str("\n;\n");
    out
}

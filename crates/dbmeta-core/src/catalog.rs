//! Catalog records and the catalog reader interface.
//!
//! A [`CatalogReader`] turns each catalog query into typed records, so the
//! DDL generator never deals with positional row access.

use async_trait::async_trait;

use crate::error::Result;
use crate::typemap::FieldType;

/// Prefix of names generated by the engine itself.
pub const SYSTEM_PREFIX: &str = "RDB$";

/// Returns whether a name was generated by the engine.
#[must_use]
pub fn is_system_name(name: &str) -> bool {
    name.starts_with(SYSTEM_PREFIX)
}

/// A field definition; user-named ones are domains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    /// Field name.
    pub name: String,
    /// Stored type.
    pub field: FieldType,
}

/// A table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Name of the field definition backing this column.
    pub field_source: String,
    /// Stored type of the backing field.
    pub field: FieldType,
    /// Whether NULL is allowed.
    pub nullable: bool,
    /// Default clause source text (e.g. `DEFAULT 0`).
    pub default_source: Option<String>,
    /// Whether values are generated by the engine.
    pub identity: bool,
}

impl Column {
    /// Returns the domain name if the column is declared with a user domain.
    /// An empty field source means the column has no backing field.
    #[must_use]
    pub fn domain(&self) -> Option<&str> {
        let source = self.field_source.as_str();
        (!source.is_empty() && !is_system_name(source)).then_some(source)
    }
}

/// One foreign-key segment: a column referencing a unique column of another table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    /// Constrained column.
    pub column: String,
    /// Referenced table.
    pub ref_table: String,
    /// Referenced column.
    pub ref_column: String,
}

/// A user table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Table name.
    pub name: String,
    /// Columns in declaration order.
    pub columns: Vec<Column>,
    /// Foreign keys.
    pub foreign_keys: Vec<ForeignKey>,
}

/// Direction of a procedure parameter, as stored in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterDirection {
    /// Input parameter (`0`).
    Input,
    /// Output parameter (`1`).
    Output,
}

impl ParameterDirection {
    /// Catalog discriminator value.
    #[must_use]
    pub const fn code(self) -> i16 {
        match self {
            Self::Input => 0,
            Self::Output => 1,
        }
    }
}

/// A procedure parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Stored type.
    pub field: FieldType,
}

/// A procedure header as listed by the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureHeader {
    /// Procedure name.
    pub name: String,
    /// Stored body source, if any.
    pub source: Option<String>,
}

/// A procedure with its parameters resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Procedure {
    /// Procedure name.
    pub name: String,
    /// Input parameters ordered by position.
    pub inputs: Vec<Parameter>,
    /// Output parameters ordered by position.
    pub outputs: Vec<Parameter>,
    /// Body source, verbatim.
    pub source: String,
}

/// Read access to the database catalog.
#[async_trait]
pub trait CatalogReader: Send {
    /// Lists non-system field definitions, ordered by name.
    async fn domains(&mut self) -> Result<Vec<Domain>>;

    /// Lists user tables (views excluded), ordered by name.
    async fn tables(&mut self) -> Result<Vec<String>>;

    /// Lists the columns of a table in position order.
    async fn columns(&mut self, table: &str) -> Result<Vec<Column>>;

    /// Lists foreign-key segments of a table.
    async fn foreign_keys(&mut self, table: &str) -> Result<Vec<ForeignKey>>;

    /// Lists procedures, ordered by name.
    async fn procedures(&mut self) -> Result<Vec<ProcedureHeader>>;

    /// Lists the parameters of a procedure in one direction, ordered by position.
    async fn parameters(
        &mut self,
        procedure: &str,
        direction: ParameterDirection,
    ) -> Result<Vec<Parameter>>;
}

//! # dbmeta-core
//!
//! Schema synchronization through plain-text script files.
//!
//! Two pipelines share one canonical, line-oriented statement format:
//!
//! - **Apply**: scripts are ordered (`domains.sql`, `tables.sql`,
//!   `procedures.sql`, then everything else by name), split into statements
//!   by [`segment::split_statements`] and executed by a [`runner::ScriptRunner`]
//!   in build mode (autocommit, statement-level isolation) or update mode
//!   (one transaction per script).
//! - **Export**: [`ddl::export_catalog`] walks a [`catalog::CatalogReader`]
//!   and renders domains, tables and procedures, in the syntax of a
//!   [`dialect::DdlDialect`], as scripts the apply pipeline can replay.
//!
//! Both pipelines render catalog types through [`typemap::map_type`].
//!
//! The database connection and the filesystem are collaborators behind the
//! [`runner::StatementExecutor`], [`catalog::CatalogReader`],
//! [`script::ScriptSource`] and [`script::ScriptSink`] traits.
//!
//! ```rust
//! use dbmeta_core::script::ScriptCategory;
//! use dbmeta_core::segment::split_statements;
//!
//! let stmts = split_statements(
//!     "CREATE DOMAIN D_ID AS INTEGER;\n-- comment\nCREATE DOMAIN D_QTY AS SMALLINT;\n",
//!     ScriptCategory::Domains,
//! );
//! assert_eq!(stmts.len(), 2);
//! ```

pub mod catalog;
pub mod ddl;
pub mod dialect;
pub mod error;
pub mod report;
pub mod runner;
pub mod script;
pub mod segment;
pub mod typemap;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::catalog::{
        CatalogReader, Column, Domain, ForeignKey, Parameter, ParameterDirection, Procedure,
        ProcedureHeader, Table,
    };
    pub use crate::ddl::{export_catalog, ExportedScripts};
    pub use crate::dialect::{DdlDialect, FirebirdDialect};
    pub use crate::error::{Result, SyncError};
    pub use crate::report::{ExecutionReport, ScriptFailure};
    pub use crate::runner::{RunMode, ScriptRunner, StatementExecutor};
    pub use crate::script::{ScriptCategory, ScriptFile, ScriptSink, ScriptSource};
    pub use crate::segment::split_statements;
    pub use crate::typemap::{map_type, CanonicalType, FieldType};
}

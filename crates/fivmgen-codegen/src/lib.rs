#![forbid(unsafe_code)]
//! fivmgen-codegen: numbered variable order → engine artifacts.
//!
//! Design:
//! - `config` writes the line-oriented tree description the runtime loads.
//! - `sql` writes the lifted `SELECT SUM(...)` program plus its DDL.
//! - `sql_types` holds the attribute → SQL column spelling tables.
//! - `dsl` reads query definitions from YAML.
//! - `compile` is the single entry point the driver calls.
//!
//! NOTE: No file I/O here; every emitter returns a `String`.

pub mod compile;
pub mod config;
pub mod dsl;
pub mod query;
pub mod sql;
pub mod sql_types;

pub use compile::{compile, CompileRequest, OutputMode};
pub use config::emit_config;
pub use dsl::yaml::{parse_query_yaml, CatalogProvider, ParsedQuery};
pub use query::QueryDefinition;
pub use sql::emit_sql;
pub use sql_types::SqlTypeTable;

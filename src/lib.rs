//! fivmgen: compile join queries into variable orders and lifted SQL for
//! factorized incremental view maintenance engines.
//!
//! The workspace crates do the work; this facade re-exports them so
//! integration tests and benches can reach everything from one place.

pub use fivmgen_catalog as catalog;
pub use fivmgen_codegen as codegen;
pub use fivmgen_core as core;
pub use fivmgen_vo as vo;

pub use fivmgen_catalog::{lookup, BuiltinCatalogs, RegisteredQuery};
pub use fivmgen_codegen::{compile, CompileRequest, OutputMode, QueryDefinition, SqlTypeTable};
pub use fivmgen_core::config::CompileConfig;
pub use fivmgen_core::error::{Error, Result};
pub use fivmgen_vo::{BuiltOrder, InsertPolicy, SeedNode, VariableOrder};

/// Compile a registered query with the default configuration.
pub fn compile_registered(
    group: &str,
    query: &str,
    dataset: &str,
    mode: OutputMode,
) -> Result<String> {
    let registered = lookup(group, query)?;
    let config = CompileConfig::default();
    compile(&CompileRequest {
        query: &registered.definition,
        dataset_path: &config.dataset_path(dataset),
        mode,
        sql_types: &registered.sql_types,
        config: &config,
    })
}

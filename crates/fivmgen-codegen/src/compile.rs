//! Entry contract: (query, dataset path, output mode) → artifact text.

use std::fmt;
use std::str::FromStr;

use fivmgen_core::config::CompileConfig;
use fivmgen_core::error::{Error, Result};
use fivmgen_vo::InsertPolicy;
use serde::{Deserialize, Serialize};

use crate::config::emit_config;
use crate::query::QueryDefinition;
use crate::sql::emit_sql;
use crate::sql_types::SqlTypeTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Config,
    Sql,
}

impl FromStr for OutputMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "config" | "txt" => Ok(OutputMode::Config),
            "sql" => Ok(OutputMode::Sql),
            other => Err(Error::Usage(format!(
                "unknown output mode '{other}' (expected 'config' or 'sql')"
            ))),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputMode::Config => "config",
            OutputMode::Sql => "sql",
        })
    }
}

pub struct CompileRequest<'a> {
    pub query: &'a QueryDefinition,
    pub dataset_path: &'a str,
    pub mode: OutputMode,
    pub sql_types: &'a SqlTypeTable,
    pub config: &'a CompileConfig,
}

/// Compile one query into the requested artifact.
pub fn compile(req: &CompileRequest<'_>) -> Result<String> {
    #[cfg(feature = "tracing")]
    tracing::info!(
        group = %req.query.group,
        query = %req.query.id,
        mode = %req.mode,
        relations = req.query.relations.len(),
        "compiling"
    );

    match req.mode {
        OutputMode::Config => {
            let built = req.query.build(InsertPolicy::Config)?;
            emit_config(&built, &req.query.relations)
        }
        OutputMode::Sql => emit_sql(req.query, req.sql_types, req.dataset_path, req.config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_mode_parsing() {
        assert_eq!("sql".parse::<OutputMode>().unwrap(), OutputMode::Sql);
        assert_eq!("config".parse::<OutputMode>().unwrap(), OutputMode::Config);
        assert!(matches!("dot".parse::<OutputMode>(), Err(Error::Usage(_))));
    }
}

//! Compile configuration that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileConfig {
    /// Header the engine loads the ring type from.
    pub ring_header: String,

    /// Tuning parameter of the `RingFactorizedRelation` type.
    pub ring_parameter: String,

    /// Field delimiter of the ingested CSV files.
    pub csv_delimiter: char,

    /// Directory that bare dataset names are resolved against.
    pub dataset_root: String,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            ring_header: "ring/ring_factorized.hpp".to_string(),
            ring_parameter: "dynamic_min".to_string(),
            csv_delimiter: '|',
            dataset_root: "./datasets".to_string(),
        }
    }
}

impl CompileConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `FIVMGEN_RING_HEADER`: ring type header path
    /// - `FIVMGEN_RING_PARAMETER`: ring type parameter schema
    /// - `FIVMGEN_CSV_DELIMITER`: single-character CSV delimiter
    /// - `FIVMGEN_DATASET_ROOT`: directory bare dataset names resolve against
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(s) = lookup("FIVMGEN_RING_HEADER") {
            cfg.ring_header = s;
        }

        if let Some(s) = lookup("FIVMGEN_RING_PARAMETER") {
            cfg.ring_parameter = s;
        }

        if let Some(s) = lookup("FIVMGEN_CSV_DELIMITER") {
            let mut chars = s.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                cfg.csv_delimiter = c;
            }
        }

        if let Some(s) = lookup("FIVMGEN_DATASET_ROOT") {
            cfg.dataset_root = s;
        }

        cfg
    }

    /// Resolve a dataset argument: a bare name lands under `dataset_root`,
    /// anything containing a path separator is used verbatim.
    pub fn dataset_path(&self, dataset: &str) -> String {
        if dataset.contains('/') {
            dataset.trim_end_matches('/').to_string()
        } else {
            format!("{}/{}", self.dataset_root.trim_end_matches('/'), dataset)
        }
    }
}

#![forbid(unsafe_code)]
//! fivmgen-catalog: benchmark schemas and the hard-coded query registry.
//!
//! Everything here is static data. The compiler never depends on it; the
//! CLI and tests use it to name queries by `(group, id)`.

pub mod registry;
pub mod retailer;
pub mod tpch;

use fivmgen_codegen::{CatalogProvider, SqlTypeTable};
use fivmgen_core::schema::{AttrType, Attribute, Catalog, RelationSchema};

pub use registry::{groups, lookup, RegisteredQuery};

/// Names accepted by `BuiltinCatalogs` (and the YAML `catalog:` field).
pub const CATALOGS: &[&str] = &["tpch", "retailer"];

/// Resolves the built-in catalog names for the YAML front-end.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalogs;

impl CatalogProvider for BuiltinCatalogs {
    fn catalog(&self, name: &str) -> Option<Catalog> {
        match name {
            "tpch" => Some(tpch::catalog()),
            "retailer" => Some(retailer::catalog()),
            _ => None,
        }
    }

    fn sql_types(&self, name: &str) -> Option<SqlTypeTable> {
        match name {
            "tpch" => Some(tpch::sql_types()),
            "retailer" => Some(SqlTypeTable::from_catalog(&retailer::catalog())),
            _ => None,
        }
    }
}

pub(crate) fn relation(name: &str, attrs: &[(&str, AttrType)], keys: &[&str]) -> RelationSchema {
    RelationSchema {
        name: name.to_string(),
        attributes: attrs.iter().map(|(n, t)| Attribute::new(*n, *t)).collect(),
        keys: keys.iter().map(|k| k.to_string()).collect(),
    }
}

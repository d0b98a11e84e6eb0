//! YAML → `QueryDefinition`.
//!
//! Example:
//! ```yaml
//! group: custom
//! query: Q1
//! catalog: tpch            # optional; lets relations be named, not spelled out
//! order: { var: nationkey, children: [ { var: regionkey } ] }
//! relations:
//!   - nation
//!   - region
//!   - name: extra
//!     attributes: [ { name: regionkey, type: int }, { name: note, type: string } ]
//!     keys: [regionkey]
//! free: [nationkey, regionkey, n_name]
//! sql_types: { note: "VARCHAR(20)" }   # optional; replaces the catalog's table
//! ```

use fivmgen_core::error::{Error, Result};
use fivmgen_core::schema::{Catalog, RelationSchema};
use fivmgen_vo::SeedNode;
use serde::{Deserialize, Serialize};

use crate::query::QueryDefinition;
use crate::sql_types::SqlTypeTable;

/// Source of named schema catalogs and their SQL dialects.
pub trait CatalogProvider {
    fn catalog(&self, name: &str) -> Option<Catalog>;
    fn sql_types(&self, name: &str) -> Option<SqlTypeTable>;
}

/// Provider for documents that spell out every relation inline.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCatalogs;

impl CatalogProvider for NoCatalogs {
    fn catalog(&self, _name: &str) -> Option<Catalog> {
        None
    }

    fn sql_types(&self, _name: &str) -> Option<SqlTypeTable> {
        None
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryDocument {
    #[serde(default = "default_group")]
    pub group: String,
    pub query: String,
    #[serde(default)]
    pub catalog: Option<String>,
    pub order: SeedNode,
    pub relations: Vec<RelationRef>,
    #[serde(default)]
    pub free: Vec<String>,
    #[serde(default)]
    pub sql_types: Option<SqlTypeTable>,
}

fn default_group() -> String {
    "custom".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationRef {
    Named(String),
    Inline(RelationSchema),
}

/// A parsed definition together with the SQL dialect it should be emitted in.
#[derive(Debug, Clone)]
pub struct ParsedQuery {
    pub definition: QueryDefinition,
    pub sql_types: SqlTypeTable,
}

pub fn parse_query_yaml(text: &str, provider: &dyn CatalogProvider) -> Result<ParsedQuery> {
    let doc: QueryDocument = serde_yaml::from_str(text)?;
    doc.resolve(provider)
}

impl QueryDocument {
    pub fn resolve(self, provider: &dyn CatalogProvider) -> Result<ParsedQuery> {
        let catalog = match &self.catalog {
            Some(name) => Some(
                provider
                    .catalog(name)
                    .ok_or_else(|| Error::Config(format!("unknown catalog '{name}'")))?,
            ),
            None => None,
        };

        let mut relations = Vec::with_capacity(self.relations.len());
        for r in self.relations {
            let schema = match r {
                RelationRef::Inline(schema) => schema,
                RelationRef::Named(name) => catalog
                    .as_ref()
                    .ok_or_else(|| {
                        Error::Config(format!(
                            "relation '{name}' is referenced by name but no catalog is set"
                        ))
                    })?
                    .lookup(&name)?
                    .clone(),
            };
            schema.validate()?;
            relations.push(schema);
        }

        let sql_types = match (self.sql_types, &self.catalog) {
            (Some(explicit), _) => explicit,
            (None, Some(name)) => provider
                .sql_types(name)
                .unwrap_or_else(|| SqlTypeTable::derive(&relations)),
            (None, None) => SqlTypeTable::derive(&relations),
        };

        Ok(ParsedQuery {
            definition: QueryDefinition::new(self.group, self.query, self.order, relations, self.free),
            sql_types,
        })
    }
}

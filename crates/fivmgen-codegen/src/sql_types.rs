//! Attribute → SQL column-type spelling.
//!
//! The config file speaks in primitive types (`int`, `double`, ...); the
//! `CREATE STREAM` and lift declarations need engine SQL spellings such as
//! `DECIMAL` or `CHAR(25)`. A table is passed to the SQL emitter explicitly
//! so several dialects can coexist.

use std::collections::BTreeMap;

use fivmgen_core::error::{Error, Result};
use fivmgen_core::schema::{AttrType, Catalog, RelationSchema};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqlTypeTable {
    spellings: BTreeMap<String, String>,
}

impl SqlTypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            spellings: pairs
                .iter()
                .map(|(a, t)| (a.to_string(), t.to_string()))
                .collect(),
        }
    }

    /// Default spelling for a primitive type.
    pub fn spelling_for(data_type: AttrType) -> &'static str {
        match data_type {
            AttrType::Int => "INT",
            AttrType::Double => "DECIMAL",
            AttrType::String => "VARCHAR",
            AttrType::Char => "CHAR(1)",
        }
    }

    /// Derive a table from declared primitive types. First declaration wins
    /// when two relations disagree on an attribute's type.
    pub fn derive<'a>(relations: impl IntoIterator<Item = &'a RelationSchema>) -> Self {
        let mut table = Self::new();
        for relation in relations {
            for attr in &relation.attributes {
                table
                    .spellings
                    .entry(attr.name.clone())
                    .or_insert_with(|| Self::spelling_for(attr.data_type).to_string());
            }
        }
        table
    }

    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self::derive(catalog.relations())
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn insert(&mut self, attribute: impl Into<String>, spelling: impl Into<String>) {
        self.spellings.insert(attribute.into(), spelling.into());
    }

    /// Layer `other` on top of `self`; `other` wins on conflicts.
    pub fn extend(&mut self, other: &SqlTypeTable) {
        for (a, t) in &other.spellings {
            self.spellings.insert(a.clone(), t.clone());
        }
    }

    pub fn get(&self, attribute: &str) -> Option<&str> {
        self.spellings.get(attribute).map(String::as_str)
    }

    /// Spelling for `attribute`, reporting `relation` when it is missing.
    pub fn spell(&self, relation: &str, attribute: &str) -> Result<&str> {
        self.get(attribute).ok_or_else(|| Error::SchemaLookup {
            relation: relation.to_string(),
            attribute: attribute.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.spellings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spellings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_table_uses_primitive_spellings() {
        let r = RelationSchema::from_pairs(
            "R",
            &[("a", AttrType::Int), ("b", AttrType::Double), ("c", AttrType::Char)],
            &[],
        )
        .unwrap();
        let t = SqlTypeTable::derive([&r]);
        assert_eq!(t.get("a"), Some("INT"));
        assert_eq!(t.get("b"), Some("DECIMAL"));
        assert_eq!(t.get("c"), Some("CHAR(1)"));
    }

    #[test]
    fn missing_spelling_reports_relation_and_attribute() {
        let t = SqlTypeTable::from_pairs(&[("a", "INT")]);
        match t.spell("R", "zz") {
            Err(Error::SchemaLookup { relation, attribute }) => {
                assert_eq!(relation, "R");
                assert_eq!(attribute, "zz");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn yaml_table_and_layering() {
        let mut base = SqlTypeTable::from_yaml("a: INT\nb: CHAR(10)\n").unwrap();
        base.extend(&SqlTypeTable::from_pairs(&[("b", "VARCHAR(5)")]));
        assert_eq!(base.get("b"), Some("VARCHAR(5)"));
        assert_eq!(base.len(), 2);
    }
}

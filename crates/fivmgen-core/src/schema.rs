//! Relation schemas and schema catalogs. Pure data.
//!
//! A `RelationSchema` keeps its attributes in declaration order; that order
//! is visible in the emitted config (`<rel> <binding> a,b,c`) and in the
//! generated `CREATE STREAM` column lists.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Primitive attribute types understood by the downstream engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttrType {
    Int,
    Double,
    String,
    Char,
}

impl AttrType {
    pub fn as_str(self) -> &'static str {
        match self {
            AttrType::Int => "int",
            AttrType::Double => "double",
            AttrType::String => "string",
            AttrType::Char => "char",
        }
    }
}

impl fmt::Display for AttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttrType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "int" => Ok(AttrType::Int),
            "double" => Ok(AttrType::Double),
            "string" => Ok(AttrType::String),
            "char" => Ok(AttrType::Char),
            other => Err(Error::Schema(format!("unknown attribute type '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: AttrType,
}

impl Attribute {
    pub fn new(name: impl Into<String>, data_type: AttrType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// One input relation: a unique name, ordered attributes, and declared keys.
///
/// Keys are advisory; nothing in the variable-order construction reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationSchema {
    pub name: String,
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub keys: Vec<String>,
}

impl RelationSchema {
    /// Build a schema, rejecting duplicate attribute names.
    pub fn new(
        name: impl Into<String>,
        attributes: Vec<Attribute>,
        keys: Vec<String>,
    ) -> Result<Self> {
        let schema = Self {
            name: name.into(),
            attributes,
            keys,
        };
        schema.validate()?;
        Ok(schema)
    }

    /// Shorthand used by the built-in catalogs: `(name, type)` pairs.
    pub fn from_pairs(name: &str, attributes: &[(&str, AttrType)], keys: &[&str]) -> Result<Self> {
        Self::new(
            name,
            attributes
                .iter()
                .map(|(n, t)| Attribute::new(*n, *t))
                .collect(),
            keys.iter().map(|k| k.to_string()).collect(),
        )
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for attr in &self.attributes {
            if !seen.insert(attr.name.as_str()) {
                return Err(Error::Schema(format!(
                    "relation '{}' declares attribute '{}' twice",
                    self.name, attr.name
                )));
            }
        }
        Ok(())
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|a| a.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }

    pub fn type_of(&self, name: &str) -> Option<AttrType> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.data_type)
    }

    pub fn arity(&self) -> usize {
        self.attributes.len()
    }
}

/// Static `name → schema` lookup. Deterministic iteration (BTreeMap).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    relations: BTreeMap<String, RelationSchema>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, schema: RelationSchema) -> Self {
        self.insert(schema);
        self
    }

    /// Insert or replace a schema, returning the previous one.
    pub fn insert(&mut self, schema: RelationSchema) -> Option<RelationSchema> {
        self.relations.insert(schema.name.clone(), schema)
    }

    pub fn get(&self, name: &str) -> Option<&RelationSchema> {
        self.relations.get(name)
    }

    pub fn lookup(&self, name: &str) -> Result<&RelationSchema> {
        self.get(name)
            .ok_or_else(|| Error::Schema(format!("unknown relation '{name}'")))
    }

    /// Resolve a list of relation names, preserving caller order.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<RelationSchema>> {
        names
            .iter()
            .map(|n| self.lookup(n.as_ref()).cloned())
            .collect()
    }

    pub fn relations(&self) -> impl Iterator<Item = &RelationSchema> {
        self.relations.values()
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}

/// Union of attribute names across `relations`.
pub fn distinct_attributes(relations: &[RelationSchema]) -> BTreeSet<&str> {
    relations.iter().flat_map(|r| r.attribute_names()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attr_type_spelling_round_trips() {
        for t in [AttrType::Int, AttrType::Double, AttrType::String, AttrType::Char] {
            assert_eq!(t.as_str().parse::<AttrType>().unwrap(), t);
        }
        assert!("float".parse::<AttrType>().is_err());
    }

    #[test]
    fn duplicate_attribute_rejected() {
        let err = RelationSchema::from_pairs("R", &[("a", AttrType::Int), ("a", AttrType::Int)], &[])
            .unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
    }

    #[test]
    fn catalog_resolves_in_caller_order() {
        let catalog = Catalog::new()
            .with(RelationSchema::from_pairs("B", &[("y", AttrType::Int)], &[]).unwrap())
            .with(RelationSchema::from_pairs("A", &[("x", AttrType::Int)], &[]).unwrap());
        let resolved = catalog.resolve(&["B", "A"]).unwrap();
        assert_eq!(resolved[0].name, "B");
        assert_eq!(resolved[1].name, "A");
        assert!(catalog.resolve(&["C"]).is_err());
    }

    #[test]
    fn schema_deserializes_lowercase_types() {
        let json = r#"{"name":"A","attributes":[{"name":"x","type":"double"}]}"#;
        let schema: RelationSchema = serde_json::from_str(json).unwrap();
        assert_eq!(schema.type_of("x"), Some(AttrType::Double));
        assert!(schema.keys.is_empty());
    }
}

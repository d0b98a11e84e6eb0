//! A query as the compiler sees it: seed order, relations, free variables.

use std::collections::BTreeSet;

use fivmgen_core::error::Result;
use fivmgen_core::schema::RelationSchema;
use fivmgen_vo::{BuiltOrder, InsertPolicy, SeedNode, TreeBuilder};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryDefinition {
    /// Query group; names the config file together with `id`.
    pub group: String,
    pub id: String,
    pub order: SeedNode,
    /// Relations in insertion order.
    pub relations: Vec<RelationSchema>,
    pub free: BTreeSet<String>,
}

impl QueryDefinition {
    pub fn new(
        group: impl Into<String>,
        id: impl Into<String>,
        order: SeedNode,
        relations: Vec<RelationSchema>,
        free: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            group: group.into(),
            id: id.into(),
            order,
            relations,
            free: free.into_iter().map(Into::into).collect(),
        }
    }

    /// `<group>-<id>.txt`, the file the SQL program imports its tree from.
    pub fn config_file_name(&self) -> String {
        format!("{}-{}.txt", self.group, self.id)
    }

    /// Grow the seed into a full, numbered variable order.
    pub fn build(&self, policy: InsertPolicy) -> Result<BuiltOrder> {
        let mut built = TreeBuilder::new(&self.order, &self.relations, &self.free)
            .policy(policy)
            .build()?;
        built.tree.assign_ids();
        Ok(built)
    }

    pub fn relation_names(&self) -> Vec<&str> {
        self.relations.iter().map(|r| r.name.as_str()).collect()
    }

    /// First relation declaring `attribute`, used to point error reports at
    /// a concrete input.
    pub fn owner_of(&self, attribute: &str) -> Option<&RelationSchema> {
        self.relations.iter().find(|r| r.contains(attribute))
    }
}

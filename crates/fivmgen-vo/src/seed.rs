//! Caller-supplied variable-order skeletons.
//!
//! A query fixes the top of its elimination order up front (the root and,
//! optionally, a few pre-placed join variables). The builder grows the rest.

use std::collections::BTreeSet;

use fivmgen_core::error::{Error, Result};
use fivmgen_core::schema::{AttrType, RelationSchema};
use serde::{Deserialize, Serialize};

use crate::tree::VariableOrder;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedNode {
    pub var: String,
    #[serde(default)]
    pub children: Vec<SeedNode>,
}

impl SeedNode {
    pub fn leaf(var: impl Into<String>) -> Self {
        Self {
            var: var.into(),
            children: Vec::new(),
        }
    }

    pub fn new(var: impl Into<String>, children: Vec<SeedNode>) -> Self {
        Self {
            var: var.into(),
            children,
        }
    }

    /// Builder-style: append one child.
    pub fn child(mut self, child: SeedNode) -> Self {
        self.children.push(child);
        self
    }

    /// Every variable in the skeleton, root first (pre-order).
    pub fn names(&self) -> Vec<&str> {
        let mut out = vec![self.var.as_str()];
        for c in &self.children {
            out.extend(c.names());
        }
        out
    }

    /// Materialize the skeleton as a tree.
    ///
    /// A seed variable takes its type from the first relation that declares
    /// it; undeclared seed variables default to `int`.
    pub fn to_tree(&self, relations: &[RelationSchema]) -> Result<VariableOrder> {
        let names = self.names();
        let distinct: BTreeSet<&str> = names.iter().copied().collect();
        if distinct.len() != names.len() {
            return Err(Error::Invariant(format!(
                "seed order rooted at '{}' repeats a variable",
                self.var
            )));
        }

        let mut tree = VariableOrder::new(&self.var, seed_type(&self.var, relations));
        let root = tree.root();
        let mut stack: Vec<_> = self.children.iter().rev().map(|c| (root, c)).collect();
        while let Some((parent, node)) = stack.pop() {
            let idx = tree.add_child(parent, &node.var, seed_type(&node.var, relations))?;
            stack.extend(node.children.iter().rev().map(|c| (idx, c)));
        }
        Ok(tree)
    }
}

fn seed_type(var: &str, relations: &[RelationSchema]) -> AttrType {
    relations
        .iter()
        .find_map(|r| r.type_of(var))
        .unwrap_or(AttrType::Int)
}

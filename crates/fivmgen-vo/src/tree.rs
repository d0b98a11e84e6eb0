//! Arena-backed variable-order tree.
//!
//! Nodes are never removed, so a `NodeIdx` stays valid for the life of the
//! tree. Slot 0 is always the root. Parent links are plain indices, which
//! keeps ancestor walks O(depth) without shared ownership.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

use fivmgen_core::error::{Error, Result};
use fivmgen_core::id::{NodeId, NodeIdx};
use fivmgen_core::schema::AttrType;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub name: String,
    pub data_type: AttrType,
    /// Pre-order id; `None` until `VariableOrder::assign_ids` runs.
    pub id: Option<NodeId>,
    pub parent: Option<NodeIdx>,
    pub children: Vec<NodeIdx>,
    /// Starts a run of variables that belong to exactly one relation.
    pub exclusive_chain: bool,
    /// Relation whose insertion appended this node; `None` for seed nodes.
    pub introduced_by: Option<String>,
}

impl TreeNode {
    fn new(name: String, data_type: AttrType, parent: Option<NodeIdx>) -> Self {
        Self {
            name,
            data_type,
            id: None,
            parent,
            children: Vec::new(),
            exclusive_chain: false,
            introduced_by: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VariableOrder {
    nodes: Vec<TreeNode>,
    #[serde(skip)]
    by_name: BTreeMap<String, NodeIdx>,
    #[serde(skip)]
    pub(crate) numbered: bool,
}

impl VariableOrder {
    /// A tree holding only its root variable.
    pub fn new(root: impl Into<String>, data_type: AttrType) -> Self {
        let root = root.into();
        let mut by_name = BTreeMap::new();
        by_name.insert(root.clone(), NodeIdx::new(0));
        Self {
            nodes: vec![TreeNode::new(root, data_type, None)],
            by_name,
            numbered: false,
        }
    }

    pub fn root(&self) -> NodeIdx {
        NodeIdx::new(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, idx: NodeIdx) -> &TreeNode {
        &self.nodes[idx.get()]
    }

    pub(crate) fn node_mut(&mut self, idx: NodeIdx) -> &mut TreeNode {
        &mut self.nodes[idx.get()]
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeIdx, &TreeNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeIdx::new(i), n))
    }

    pub fn children(&self, idx: NodeIdx) -> &[NodeIdx] {
        &self.node(idx).children
    }

    pub fn parent(&self, idx: NodeIdx) -> Option<NodeIdx> {
        self.node(idx).parent
    }

    pub fn find(&self, name: &str) -> Option<NodeIdx> {
        self.by_name.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Every variable placed in the tree.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    /// Append `name` as the last child of `parent`.
    ///
    /// Variable names are unique across the whole tree, and the tree is
    /// frozen once numbered.
    pub(crate) fn add_child(
        &mut self,
        parent: NodeIdx,
        name: &str,
        data_type: AttrType,
    ) -> Result<NodeIdx> {
        if self.numbered {
            return Err(Error::Usage(format!(
                "cannot place '{name}': the variable order is already numbered"
            )));
        }
        if let Some(existing) = self.find(name) {
            return Err(Error::Invariant(format!(
                "variable '{name}' already occupies {existing}"
            )));
        }
        let idx = NodeIdx::new(self.nodes.len());
        self.nodes
            .push(TreeNode::new(name.to_string(), data_type, Some(parent)));
        self.node_mut(parent).children.push(idx);
        self.by_name.insert(name.to_string(), idx);
        Ok(idx)
    }

    /// Ancestors of `idx`, root first, excluding `idx` itself.
    pub fn ancestors(&self, idx: NodeIdx) -> Vec<NodeIdx> {
        let mut out = Vec::new();
        let mut cur = self.parent(idx);
        while let Some(p) = cur {
            out.push(p);
            cur = self.parent(p);
        }
        out.reverse();
        out
    }

    /// Names on the root → `idx` path, inclusive.
    pub fn path_names(&self, idx: NodeIdx) -> BTreeSet<&str> {
        self.ancestors(idx)
            .into_iter()
            .chain(std::iter::once(idx))
            .map(|i| self.node(i).name.as_str())
            .collect()
    }

    /// Names in the subtree rooted at `idx`, including `idx`.
    pub fn subtree_names(&self, idx: NodeIdx) -> BTreeSet<&str> {
        let mut out = BTreeSet::new();
        let mut stack = vec![idx];
        while let Some(i) = stack.pop() {
            let n = self.node(i);
            out.insert(n.name.as_str());
            stack.extend(n.children.iter().copied());
        }
        out
    }

    /// Names reachable below `idx`: the union of its children's subtrees.
    pub fn descendant_names(&self, idx: NodeIdx) -> BTreeSet<&str> {
        self.children(idx)
            .iter()
            .flat_map(|&c| self.subtree_names(c))
            .collect()
    }

    /// Depth-first pre-order over slots, children in insertion order.
    pub fn pre_order(&self) -> Vec<NodeIdx> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];
        while let Some(i) = stack.pop() {
            out.push(i);
            stack.extend(self.children(i).iter().rev().copied());
        }
        out
    }

    pub fn depth(&self, idx: NodeIdx) -> usize {
        self.ancestors(idx).len()
    }

    /// Indented outline, four spaces per level.
    pub fn render(&self) -> String {
        let mut s = String::new();
        for idx in self.pre_order() {
            let _ = writeln!(
                s,
                "{}{}",
                " ".repeat(self.depth(idx) * 4),
                self.node(idx).name
            );
        }
        s
    }
}

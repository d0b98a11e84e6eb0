//! Exclusive-chain settlement.
//!
//! A node keeps its `exclusive_chain` mark iff exactly one relation declares
//! its variable, it has at most one child, and that child is itself marked
//! and owned by the same relation. Runs therefore end at a leaf and never
//! contain a join variable. Seed nodes that satisfy the rule are promoted.

use fivmgen_core::id::NodeIdx;
use fivmgen_core::schema::RelationSchema;

use crate::tree::VariableOrder;

pub(crate) fn settle_exclusive_chains(tree: &mut VariableOrder, relations: &[RelationSchema]) {
    let order = tree.pre_order();
    let mut owner: Vec<Option<usize>> = vec![None; tree.len()];
    for &idx in &order {
        let name = &tree.node(idx).name;
        let mut owners = relations
            .iter()
            .enumerate()
            .filter(|(_, r)| r.contains(name))
            .map(|(i, _)| i);
        owner[idx.get()] = match (owners.next(), owners.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        };
    }

    // Children before parents.
    for &idx in order.iter().rev() {
        let marked = match (owner[idx.get()], tree.children(idx)) {
            (Some(_), []) => true,
            (Some(o), [child]) => {
                tree.node(*child).exclusive_chain && owner[child.get()] == Some(o)
            }
            _ => false,
        };
        tree.node_mut(idx).exclusive_chain = marked;
    }
}

/// The maximal run starting at `start`: follow single children while they
/// stay marked.
pub fn exclusive_run(tree: &VariableOrder, start: NodeIdx) -> Vec<NodeIdx> {
    let mut run = vec![start];
    let mut cur = start;
    while let [child] = tree.children(cur) {
        if !tree.node(*child).exclusive_chain {
            break;
        }
        run.push(*child);
        cur = *child;
    }
    run
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use fivmgen_core::schema::AttrType;

    use crate::builder::{InsertPolicy, TreeBuilder};
    use crate::seed::SeedNode;

    use super::*;

    fn rel(name: &str, attrs: &[&str]) -> RelationSchema {
        let pairs: Vec<_> = attrs.iter().map(|a| (*a, AttrType::Int)).collect();
        RelationSchema::from_pairs(name, &pairs, &[]).unwrap()
    }

    fn marked(tree: &VariableOrder) -> Vec<&str> {
        tree.pre_order()
            .into_iter()
            .filter(|&i| tree.node(i).exclusive_chain)
            .map(|i| tree.node(i).name.as_str())
            .collect()
    }

    #[test]
    fn joined_chain_node_is_demoted() {
        let relations = [rel("A", &["x", "y"]), rel("B", &["y", "z"])];
        let free: BTreeSet<String> = ["x", "z"].iter().map(|s| s.to_string()).collect();
        let built = TreeBuilder::new(&SeedNode::leaf("x"), &relations, &free)
            .policy(InsertPolicy::ExclusiveChains)
            .build()
            .unwrap();
        assert_eq!(marked(&built.tree), ["z"]);
    }

    #[test]
    fn branching_node_is_demoted() {
        // y is private to R but branches into R's b and S's c.
        let seed = SeedNode::leaf("y")
            .child(SeedNode::leaf("b"))
            .child(SeedNode::leaf("c"));
        let relations = [rel("R", &["y", "b"]), rel("S", &["c", "s"])];
        let free = BTreeSet::new();
        let built = TreeBuilder::new(&seed, &relations, &free)
            .policy(InsertPolicy::ExclusiveChains)
            .build()
            .unwrap();
        let t = &built.tree;
        assert_eq!(t.render(), "y\n    b\n    c\n        s\n");
        assert_eq!(marked(t), ["b", "c", "s"]);
        assert_eq!(exclusive_run(t, t.find("c").unwrap()).len(), 2);
    }

    #[test]
    fn run_covers_whole_private_chain() {
        let relations = [rel("C", &["p", "q", "r"])];
        let free: BTreeSet<String> = ["p", "q", "r"].iter().map(|s| s.to_string()).collect();
        let built = TreeBuilder::new(&SeedNode::leaf("p"), &relations, &free)
            .policy(InsertPolicy::ExclusiveChains)
            .build()
            .unwrap();
        let t = &built.tree;
        assert_eq!(exclusive_run(t, t.root()).len(), 3);
    }
}

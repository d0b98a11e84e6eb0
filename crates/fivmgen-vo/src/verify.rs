//! Debug-time verification helpers for variable orders.
//!
//! Intended for tests and debug builds; they panic with a description of the
//! first violation they find.

use std::collections::BTreeSet;

use fivmgen_core::schema::RelationSchema;

use crate::builder::BuiltOrder;
use crate::tree::VariableOrder;

/// Ids are a pre-order permutation of `0..len`: root 0, parents below children.
pub fn assert_preorder(tree: &VariableOrder) {
    let mut seen = BTreeSet::new();
    for (idx, node) in tree.nodes() {
        let id = node
            .id
            .unwrap_or_else(|| panic!("node '{}' is not numbered", node.name))
            .get();
        assert!(seen.insert(id), "id {id} assigned twice");
        for &c in &node.children {
            let child = tree.node(c);
            let cid = child.id.map(|i| i.get()).unwrap_or(0);
            assert!(
                id < cid,
                "node '{}' ({id}) is not below child '{}' ({cid})",
                node.name,
                child.name
            );
        }
        if idx == tree.root() {
            assert_eq!(id, 0, "root id must be 0");
        }
    }
    let expected: BTreeSet<u32> = (0..tree.len() as u32).collect();
    assert_eq!(seen, expected, "ids are not dense");
}

/// Every variable occupies exactly one node.
pub fn assert_unique_names(tree: &VariableOrder) {
    let mut seen = BTreeSet::new();
    for (_, node) in tree.nodes() {
        assert!(seen.insert(&node.name), "variable '{}' placed twice", node.name);
    }
}

/// Every relation attribute is placed, and every placed attribute lies on
/// the path from the root to the relation's binding point.
pub fn assert_coverage(built: &BuiltOrder, relations: &[RelationSchema]) {
    let tree = &built.tree;
    for relation in relations {
        let binding = built
            .bindings
            .get(&relation.name)
            .unwrap_or_else(|| panic!("relation '{}' has no binding point", relation.name));
        let path = tree.path_names(binding);
        for attr in relation.attribute_names() {
            assert!(
                path.contains(attr),
                "attribute '{attr}' of '{}' is not above its binding point",
                relation.name
            );
        }
    }
}

/// Among the variables one insertion introduces, every free variable is a
/// proper ancestor of every eliminated one.
pub fn assert_free_above_bound(tree: &VariableOrder, free: &BTreeSet<String>) {
    for (idx, node) in tree.nodes() {
        let Some(origin) = node.introduced_by.as_deref() else {
            continue;
        };
        if free.contains(&node.name) {
            continue;
        }
        for (_, other) in tree.nodes() {
            if other.introduced_by.as_deref() != Some(origin) || !free.contains(&other.name) {
                continue;
            }
            let above = tree
                .ancestors(idx)
                .into_iter()
                .any(|a| tree.node(a).name == other.name);
            assert!(
                above,
                "free variable '{}' introduced by '{origin}' is not above eliminated '{}'",
                other.name, node.name
            );
        }
    }
}

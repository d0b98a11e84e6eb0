//! Relation insertion: grows a seed skeleton into a full variable order.
//!
//! For each relation (caller order), start at the root and repeat:
//! 1. If nothing below the current node mentions the relation, hang its
//!    still-unplaced attributes under the current node as one linear chain,
//!    free variables first, then eliminated ones. The chain tail is the
//!    relation's binding point.
//! 2. Otherwise descend into the first child whose subtree mentions it.
//!
//! Free variables end up above the eliminated variables a relation
//! introduces, so the engine can sum the latter out before rejoining.

use std::collections::BTreeSet;

use fivmgen_core::error::{Error, Result};
use fivmgen_core::id::NodeIdx;
use fivmgen_core::schema::RelationSchema;
use serde::Serialize;

use crate::chain::settle_exclusive_chains;
use crate::seed::SeedNode;
use crate::tree::VariableOrder;

/// How appended chain nodes are flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum InsertPolicy {
    /// Plain insertion, as consumed by the config emitter.
    #[default]
    Config,
    /// Mark appended nodes as exclusive chains and settle the marks once
    /// every relation is placed. Used by the SQL emitter.
    ExclusiveChains,
}

/// Relation name → binding point, in insertion order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Bindings(Vec<(String, NodeIdx)>);

impl Bindings {
    pub fn get(&self, relation: &str) -> Option<NodeIdx> {
        self.0
            .iter()
            .find(|(name, _)| name == relation)
            .map(|(_, idx)| *idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, NodeIdx)> {
        self.0.iter().map(|(n, i)| (n.as_str(), *i))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A fully grown (not yet numbered) tree plus its binding table.
#[derive(Debug, Clone, Serialize)]
pub struct BuiltOrder {
    pub tree: VariableOrder,
    pub bindings: Bindings,
}

pub struct TreeBuilder<'a> {
    seed: &'a SeedNode,
    relations: &'a [RelationSchema],
    free: &'a BTreeSet<String>,
    policy: InsertPolicy,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(
        seed: &'a SeedNode,
        relations: &'a [RelationSchema],
        free: &'a BTreeSet<String>,
    ) -> Self {
        Self {
            seed,
            relations,
            free,
            policy: InsertPolicy::Config,
        }
    }

    pub fn policy(mut self, policy: InsertPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn build(self) -> Result<BuiltOrder> {
        for relation in self.relations {
            relation.validate()?;
        }
        if self.relations.iter().map(|r| &r.name).collect::<BTreeSet<_>>().len()
            != self.relations.len()
        {
            return Err(Error::Schema("relation names must be unique".into()));
        }

        #[cfg(feature = "tracing")]
        for var in self.free.iter() {
            if !self.relations.iter().any(|r| r.contains(var)) {
                tracing::warn!(%var, "free variable is not declared by any relation");
            }
        }

        let mut tree = self.seed.to_tree(self.relations)?;
        let mut bindings = Vec::with_capacity(self.relations.len());
        for relation in self.relations {
            let binding = insert_relation(&mut tree, relation, self.free, self.policy)?;
            #[cfg(feature = "tracing")]
            tracing::debug!(
                relation = %relation.name,
                binding = %tree.node(binding).name,
                "placed relation"
            );
            bindings.push((relation.name.clone(), binding));
        }

        if self.policy == InsertPolicy::ExclusiveChains {
            settle_exclusive_chains(&mut tree, self.relations);
        }

        Ok(BuiltOrder {
            tree,
            bindings: Bindings(bindings),
        })
    }
}

/// Build with the plain (config) policy.
pub fn build_variable_order(
    seed: &SeedNode,
    relations: &[RelationSchema],
    free: &BTreeSet<String>,
) -> Result<BuiltOrder> {
    TreeBuilder::new(seed, relations, free).build()
}

/// Place one relation; returns its binding point.
fn insert_relation(
    tree: &mut VariableOrder,
    relation: &RelationSchema,
    free: &BTreeSet<String>,
    policy: InsertPolicy,
) -> Result<NodeIdx> {
    let attrs: BTreeSet<&str> = relation.attribute_names().collect();
    let mut current = tree.root();

    // Every descent moves one level down, so the walk ends within `len` steps.
    for _ in 0..=tree.len() {
        if tree.descendant_names(current).is_disjoint(&attrs) {
            let placed = tree.path_names(current);
            let (free_new, bound_new): (Vec<&str>, Vec<&str>) = attrs
                .iter()
                .copied()
                .filter(|a| !placed.contains(a))
                .partition(|a| free.contains(*a));

            let mut tail = current;
            for var in free_new.into_iter().chain(bound_new) {
                if let Some(existing) = tree.find(var) {
                    return Err(Error::Invariant(format!(
                        "relation '{}' reaches '{}' through {} but '{}' already sits at {} off that path",
                        relation.name,
                        tree.node(current).name,
                        current,
                        var,
                        existing
                    )));
                }
                let data_type = relation.type_of(var).ok_or_else(|| {
                    Error::Invariant(format!("'{var}' vanished from relation '{}'", relation.name))
                })?;
                tail = tree.add_child(tail, var, data_type)?;
                tree.node_mut(tail).introduced_by = Some(relation.name.clone());
                if policy == InsertPolicy::ExclusiveChains {
                    tree.node_mut(tail).exclusive_chain = true;
                }
                #[cfg(feature = "tracing")]
                tracing::trace!(relation = %relation.name, %var, "appended variable");
            }
            return Ok(tail);
        }

        let next = tree
            .children(current)
            .iter()
            .copied()
            .find(|&c| !tree.subtree_names(c).is_disjoint(&attrs));
        current = next.ok_or_else(|| {
            Error::Invariant(format!(
                "relation '{}' intersects the subtree below '{}' but no child of it",
                relation.name,
                tree.node(current).name
            ))
        })?;
    }

    Err(Error::Invariant(format!(
        "insertion of relation '{}' did not terminate",
        relation.name
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fivmgen_core::schema::AttrType;

    fn rel(name: &str, attrs: &[&str]) -> RelationSchema {
        let pairs: Vec<_> = attrs.iter().map(|a| (*a, AttrType::Int)).collect();
        RelationSchema::from_pairs(name, &pairs, &[]).unwrap()
    }

    fn free(vars: &[&str]) -> BTreeSet<String> {
        vars.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn two_relation_chain() {
        let relations = [rel("A", &["x", "y"]), rel("B", &["y", "z"])];
        let built =
            build_variable_order(&SeedNode::leaf("x"), &relations, &free(&["x", "z"])).unwrap();
        assert_eq!(built.tree.render(), "x\n    y\n        z\n");
        let t = &built.tree;
        assert_eq!(t.node(built.bindings.get("A").unwrap()).name, "y");
        assert_eq!(t.node(built.bindings.get("B").unwrap()).name, "z");
    }

    #[test]
    fn free_variables_sit_above_bound_ones() {
        let relations = [rel("R", &["k", "d", "a", "c", "b"])];
        let built =
            build_variable_order(&SeedNode::leaf("k"), &relations, &free(&["k", "c", "a"])).unwrap();
        // free {a, c} sorted, then bound {b, d} sorted
        let order: Vec<_> = built
            .tree
            .pre_order()
            .into_iter()
            .map(|i| built.tree.node(i).name.clone())
            .collect();
        assert_eq!(order, ["k", "a", "c", "b", "d"]);
    }

    #[test]
    fn relation_without_new_variables_binds_where_it_stops() {
        let relations = [rel("A", &["x", "y"]), rel("B", &["x", "y"])];
        let built = build_variable_order(&SeedNode::leaf("x"), &relations, &free(&[])).unwrap();
        assert_eq!(built.tree.len(), 2);
        assert_eq!(built.bindings.get("A"), built.bindings.get("B"));
    }

    #[test]
    fn descends_into_first_matching_child() {
        let seed = SeedNode::leaf("r")
            .child(SeedNode::leaf("a"))
            .child(SeedNode::leaf("b"));
        let relations = [rel("S", &["b", "s"])];
        let built = build_variable_order(&seed, &relations, &free(&[])).unwrap();
        let s = built.tree.find("s").unwrap();
        assert_eq!(built.tree.node(built.tree.parent(s).unwrap()).name, "b");
    }

    #[test]
    fn disjoint_relation_hangs_off_the_root() {
        let relations = [rel("A", &["x"]), rel("B", &["u", "v"])];
        let built = build_variable_order(&SeedNode::leaf("x"), &relations, &free(&["v"])).unwrap();
        assert_eq!(built.tree.render(), "x\n    v\n        u\n");
    }

    #[test]
    fn variable_placed_off_path_is_rejected() {
        let seed = SeedNode::leaf("r")
            .child(SeedNode::leaf("a"))
            .child(SeedNode::leaf("b"));
        let relations = [rel("S", &["a", "b"])];
        let err = build_variable_order(&seed, &relations, &free(&[])).unwrap_err();
        assert!(matches!(err, Error::Invariant(msg) if msg.contains("'S'")));
    }

    #[test]
    fn duplicate_relation_names_rejected() {
        let relations = [rel("A", &["x"]), rel("A", &["y"])];
        assert!(matches!(
            build_variable_order(&SeedNode::leaf("x"), &relations, &free(&[])),
            Err(Error::Schema(_))
        ));
    }

    #[test]
    fn exclusive_policy_marks_appended_nodes() {
        let relations = [rel("C", &["p", "q", "r"])];
        let built = TreeBuilder::new(&SeedNode::leaf("p"), &relations, &free(&["p", "q", "r"]))
            .policy(InsertPolicy::ExclusiveChains)
            .build()
            .unwrap();
        assert!(built.tree.nodes().all(|(_, n)| n.exclusive_chain));
    }
}

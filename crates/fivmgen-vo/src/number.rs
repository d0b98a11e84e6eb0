//! Identifier assignment: dense pre-order ids, root = 0.
//!
//! Ids depend only on tree shape and child order, so renumbering an
//! unchanged tree is a no-op.

use fivmgen_core::error::{Error, Result};
use fivmgen_core::id::{NodeId, NodeIdx};

use crate::tree::VariableOrder;

impl VariableOrder {
    /// Number every node in pre-order; returns the next free id.
    pub fn assign_ids(&mut self) -> NodeId {
        let mut next = NodeId::ROOT;
        for idx in self.pre_order() {
            self.node_mut(idx).id = Some(next);
            next = next.next();
        }
        self.numbered = true;
        next
    }

    pub fn is_numbered(&self) -> bool {
        self.numbered
    }

    /// The id of `idx`, or a usage error if numbering has not run.
    pub fn id_of(&self, idx: NodeIdx) -> Result<NodeId> {
        self.node(idx).id.ok_or_else(|| {
            Error::Usage(format!(
                "node '{}' has no id; call assign_ids before emitting",
                self.node(idx).name
            ))
        })
    }

    /// Ancestor ids of `idx`, root first.
    pub fn ancestor_ids(&self, idx: NodeIdx) -> Result<Vec<NodeId>> {
        self.ancestors(idx)
            .into_iter()
            .map(|a| self.id_of(a))
            .collect()
    }

    /// Parent id, `None` for the root.
    pub fn parent_id(&self, idx: NodeIdx) -> Result<Option<NodeId>> {
        self.parent(idx).map(|p| self.id_of(p)).transpose()
    }
}

//! Config emitter: the line-oriented tree description.
//!
//! ```text
//! <numVars> <numRelations>
//! <id> <name> <type> <parentId|-1> {<ancestor ids>} 0     one per node, pre-order
//! <relName> <bindingId> <attr1,attr2,...>                 one per relation
//! ```
//!
//! The trailing `0` on node lines is a reserved field.

use std::fmt::Write as _;

use fivmgen_core::error::{Error, Result};
use fivmgen_core::schema::{distinct_attributes, RelationSchema};
use fivmgen_vo::BuiltOrder;

pub fn emit_config(built: &BuiltOrder, relations: &[RelationSchema]) -> Result<String> {
    let tree = &built.tree;
    if !tree.is_numbered() {
        return Err(Error::Usage(
            "emit_config called before the variable order was numbered".into(),
        ));
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        distinct_attributes(relations).len(),
        relations.len()
    );

    for idx in tree.pre_order() {
        let node = tree.node(idx);
        let parent = match tree.parent_id(idx)? {
            Some(p) => p.get().to_string(),
            None => "-1".to_string(),
        };
        let ancestors = tree
            .ancestor_ids(idx)?
            .iter()
            .map(|a| a.get().to_string())
            .collect::<Vec<_>>()
            .join(",");
        let _ = writeln!(
            out,
            "{} {} {} {} {{{}}} 0",
            tree.id_of(idx)?.get(),
            node.name,
            node.data_type,
            parent,
            ancestors
        );
    }

    for relation in relations {
        let binding = built.bindings.get(&relation.name).ok_or_else(|| {
            Error::Usage(format!(
                "relation '{}' was not part of this variable order",
                relation.name
            ))
        })?;
        let attrs = relation.attribute_names().collect::<Vec<_>>().join(",");
        let _ = writeln!(
            out,
            "{} {} {}",
            relation.name,
            tree.id_of(binding)?.get(),
            attrs
        );
    }

    Ok(out)
}

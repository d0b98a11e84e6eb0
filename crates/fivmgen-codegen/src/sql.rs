//! SQL emitter: a lifted, factorized `SELECT SUM(...)` program.
//!
//! The tree is rebuilt with `InsertPolicy::ExclusiveChains`, so the ids match
//! the config emitter's and every run of single-relation columns can be
//! lifted as one N-ary factor. Shared (join) variables get one unary factor
//! each; factors multiply in pre-order, shared children before exclusive ones.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use fivmgen_core::config::CompileConfig;
use fivmgen_core::error::{Error, Result};
use fivmgen_core::id::NodeIdx;
use fivmgen_core::schema::RelationSchema;
use fivmgen_vo::chain::exclusive_run;
use fivmgen_vo::{InsertPolicy, VariableOrder};

use crate::query::QueryDefinition;
use crate::sql_types::SqlTypeTable;

const RING_TYPE: &str = "RingFactorizedRelation";

pub fn emit_sql(
    query: &QueryDefinition,
    sql_types: &SqlTypeTable,
    dataset_path: &str,
    config: &CompileConfig,
) -> Result<String> {
    let built = query.build(InsertPolicy::ExclusiveChains)?;

    let mut s = String::new();
    let _ = writeln!(s, "IMPORT DTREE FROM FILE '{}';", query.config_file_name());
    s.push('\n');

    let _ = writeln!(s, "CREATE DISTRIBUTED TYPE {RING_TYPE}");
    let _ = writeln!(s, "FROM FILE '{}'", config.ring_header);
    let _ = writeln!(s, "WITH PARAMETER SCHEMA ({});", config.ring_parameter);
    s.push('\n');

    for relation in &query.relations {
        s.push_str(&create_stream(relation, sql_types, dataset_path, config)?);
        s.push('\n');
    }

    let factors = if query.relations.is_empty() {
        Vec::new()
    } else {
        let mut factors = Vec::new();
        lift_factors(&built.tree, built.tree.root(), query, sql_types, &mut factors)?;
        factors
    };
    #[cfg(feature = "tracing")]
    tracing::debug!(query = %query.id, factors = factors.len(), "generated lift expression");

    s.push_str("SELECT SUM(\n");
    if !factors.is_empty() {
        s.push('\t');
        s.push_str(&factors.join(" *\n\t"));
        s.push('\n');
    }
    let _ = writeln!(s, ")\nFROM {};", query.relation_names().join(" NATURAL JOIN "));
    Ok(s)
}

/// `CREATE STREAM` declaration for one pipe-delimited input file.
fn create_stream(
    relation: &RelationSchema,
    sql_types: &SqlTypeTable,
    dataset_path: &str,
    config: &CompileConfig,
) -> Result<String> {
    let columns = relation
        .attributes
        .iter()
        .map(|a| Ok(format!("\t{} {}", a.name, sql_types.spell(&relation.name, &a.name)?)))
        .collect::<Result<Vec<_>>>()?;

    let mut s = String::new();
    let _ = writeln!(s, "CREATE STREAM {} (", relation.name);
    s.push_str(&columns.join(",\n"));
    s.push_str(")\n");
    let _ = writeln!(
        s,
        "FROM FILE '{}/{}.csv'",
        dataset_path.trim_end_matches('/'),
        relation.name
    );
    let _ = writeln!(
        s,
        "LINE DELIMITED CSV (delimiter := '{}');",
        config.csv_delimiter
    );
    Ok(s)
}

fn lift_factors(
    tree: &VariableOrder,
    idx: NodeIdx,
    query: &QueryDefinition,
    sql_types: &SqlTypeTable,
    out: &mut Vec<String>,
) -> Result<()> {
    if tree.node(idx).exclusive_chain {
        // The run ends at a leaf; nothing below it needs its own factor.
        let run = exclusive_run(tree, idx);
        out.push(lift(tree, idx, &run, query, sql_types)?);
        return Ok(());
    }

    out.push(lift(tree, idx, &[idx], query, sql_types)?);

    let children = tree.children(idx);
    let mut names = BTreeSet::new();
    for &c in children {
        if !names.insert(tree.node(c).name.as_str()) {
            return Err(Error::Invariant(format!(
                "node '{}' has two children named '{}'",
                tree.node(idx).name,
                tree.node(c).name
            )));
        }
    }

    let (exclusive, shared): (Vec<NodeIdx>, Vec<NodeIdx>) = children
        .iter()
        .copied()
        .partition(|&c| tree.node(c).exclusive_chain);
    for c in shared.into_iter().chain(exclusive) {
        lift_factors(tree, c, query, sql_types, out)?;
    }
    Ok(())
}

/// `[lift<id>: Ring<[id, T1,...,Tn]>](c1,...,cn)` anchored at `anchor`.
fn lift(
    tree: &VariableOrder,
    anchor: NodeIdx,
    columns: &[NodeIdx],
    query: &QueryDefinition,
    sql_types: &SqlTypeTable,
) -> Result<String> {
    let id = tree.id_of(anchor)?.get();
    let mut types = Vec::with_capacity(columns.len());
    let mut names = Vec::with_capacity(columns.len());
    for &c in columns {
        let name = tree.node(c).name.as_str();
        let relation = query
            .owner_of(name)
            .map(|r| r.name.as_str())
            .unwrap_or("<seed order>");
        types.push(sql_types.spell(relation, name)?);
        names.push(name);
    }
    Ok(format!(
        "[lift<{id}>: {RING_TYPE}<[{id}, {}]>]({})",
        types.join(","),
        names.join(",")
    ))
}

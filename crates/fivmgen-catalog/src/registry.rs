//! Hard-coded query definitions, addressed by `(group, id)`.
//!
//! Each entry fixes a seed order, the relations in insertion order, and the
//! free variables. Groups also fix the catalog and SQL dialect.

use fivmgen_codegen::{QueryDefinition, SqlTypeTable};
use fivmgen_core::error::{Error, Result};
use fivmgen_core::schema::Catalog;
use fivmgen_vo::SeedNode;

use crate::{retailer, tpch};

struct QueryEntry {
    id: &'static str,
    order: fn() -> SeedNode,
    relations: &'static [&'static str],
    free: &'static [&'static str],
}

struct GroupEntry {
    name: &'static str,
    catalog: fn() -> Catalog,
    sql_types: fn() -> SqlTypeTable,
    queries: &'static [QueryEntry],
}

/// A registry hit, ready for `fivmgen_codegen::compile`.
#[derive(Debug, Clone)]
pub struct RegisteredQuery {
    pub definition: QueryDefinition,
    pub sql_types: SqlTypeTable,
}

/// `a → b → c`
fn path(vars: &[&str]) -> SeedNode {
    let mut iter = vars.iter().rev();
    let mut node = SeedNode::leaf(*iter.next().unwrap_or(&""));
    for v in iter {
        node = SeedNode::new(*v, vec![node]);
    }
    node
}

fn retailer_sql_types() -> SqlTypeTable {
    SqlTypeTable::from_catalog(&retailer::catalog())
}

const NATION_REGION_FREE: &[&str] = &[
    "custkey", "c_name", "regionkey", "nationkey", "n_name", "r_name", "r_comment", "n_comment",
];

const TPCH: &[QueryEntry] = &[
    QueryEntry {
        id: "Q1",
        order: || path(&["regionkey"]),
        relations: &["nation", "region"],
        free: &["regionkey", "nationkey", "n_name", "r_name", "r_comment", "n_comment"],
    },
    QueryEntry {
        id: "Q2",
        order: || path(&["nationkey", "regionkey"]),
        relations: &["nation", "region", "customer"],
        free: NATION_REGION_FREE,
    },
    QueryEntry {
        id: "Q3",
        order: || path(&["custkey", "nationkey", "regionkey"]),
        relations: &["nation", "region", "customer", "orders"],
        free: &[
            "custkey", "c_name", "regionkey", "nationkey", "n_name", "r_name", "r_comment",
            "n_comment", "orderkey", "o_orderstatus",
        ],
    },
    QueryEntry {
        id: "Q4",
        order: || path(&["orderkey", "custkey", "nationkey", "regionkey"]),
        relations: &["nation", "region", "customer", "orders", "lineitem"],
        free: &[
            "custkey", "c_name", "regionkey", "nationkey", "n_name", "r_name", "r_comment",
            "n_comment", "orderkey", "o_orderstatus", "partkey", "l_quantity", "suppkey",
        ],
    },
    QueryEntry {
        id: "Q5",
        order: || {
            SeedNode::leaf("orderkey")
                .child(SeedNode::leaf("partkey"))
                .child(path(&["custkey", "nationkey", "regionkey"]))
        },
        relations: &["nation", "region", "customer", "orders", "lineitem", "partsupp", "part"],
        free: &[
            "custkey", "c_name", "regionkey", "nationkey", "n_name", "r_name", "r_comment",
            "n_comment", "orderkey", "o_orderstatus", "partkey", "l_quantity", "suppkey",
            "ps_availqty", "p_name",
        ],
    },
    QueryEntry {
        id: "Q6",
        order: || {
            SeedNode::leaf("orderkey")
                .child(SeedNode::leaf("partkey"))
                .child(path(&["custkey", "nationkey", "regionkey"]))
        },
        relations: &["nation", "region", "customer", "orders", "lineitem", "partsupp", "part"],
        free: &[
            "custkey", "c_name", "regionkey", "nationkey", "n_name", "r_name", "r_comment",
            "n_comment", "orderkey", "o_orderstatus", "partkey", "l_quantity", "suppkey",
            "ps_availqty", "p_name",
        ],
    },
    QueryEntry {
        id: "Q7",
        order: || {
            SeedNode::leaf("orderkey")
                .child(path(&["partkey", "suppkey"]))
                .child(path(&["custkey", "nationkey", "regionkey"]))
        },
        relations: &[
            "nation", "region", "customer", "orders", "lineitem", "partsupp", "part", "supplier",
        ],
        free: &[
            "custkey", "c_name", "regionkey", "nationkey", "n_name", "r_name", "r_comment",
            "n_comment", "orderkey", "o_orderstatus", "partkey", "l_quantity", "suppkey",
            "ps_availqty", "p_name", "s_name",
        ],
    },
];

const TPCH_EXT: &[QueryEntry] = &[
    QueryEntry {
        id: "1Q1b",
        order: || path(&["partkey", "suppkey", "orderkey"]),
        relations: &["part", "partsupp", "lineitem", "orders"],
        free: &[
            "orderkey", "suppkey", "partkey", "l_quantity", "ps_availqty", "p_name", "o_totalprice",
        ],
    },
    QueryEntry {
        id: "1Q1c",
        order: || path(&["partkey", "suppkey"]),
        relations: &["part", "partsupp", "q2"],
        free: &[
            "orderkey", "suppkey", "partkey", "l_quantity", "ps_availqty", "p_name", "o_totalprice",
        ],
    },
    QueryEntry {
        id: "3Q2",
        order: || path(&["suppkey", "partkey"]),
        relations: &["supplier", "partsupp", "lineitem"],
        free: &["suppkey", "partkey", "l_quantity", "ps_availqty", "ps_supplycost", "s_name"],
    },
    QueryEntry {
        id: "3Q3",
        order: || path(&["suppkey"]),
        relations: &["supplier", "partsupp"],
        free: &["suppkey", "ps_availqty", "ps_supplycost", "s_name"],
    },
    QueryEntry {
        id: "4Q3",
        order: || path(&["custkey"]),
        relations: &["customer", "orders"],
        free: &["custkey", "orderkey", "nationkey"],
    },
    QueryEntry {
        id: "5Q1",
        order: || {
            SeedNode::leaf("suppkey")
                .child(SeedNode::leaf("partkey"))
                .child(SeedNode::leaf("nationkey"))
        },
        relations: &["nation", "supplier", "customer", "part", "partsupp"],
        free: &["nationkey", "partkey", "suppkey", "n_name", "s_name", "p_name", "ps_availqty"],
    },
    QueryEntry {
        id: "5Q2",
        order: || path(&["nationkey"]),
        relations: &["nation", "supplier", "customer"],
        free: &["nationkey", "suppkey", "n_name", "s_name", "s_address", "custkey"],
    },
    QueryEntry {
        id: "5Q3",
        order: || path(&["partkey"]),
        relations: &["part", "partsupp"],
        free: &["partkey", "suppkey", "ps_availqty", "p_name"],
    },
];

const RETAILER: &[QueryEntry] = &[
    QueryEntry {
        id: "all",
        order: || {
            SeedNode::leaf("locn")
                .child(path(&["dateid", "ksn"]))
                .child(SeedNode::leaf("zip"))
        },
        relations: &["Inventory", "Location", "Census", "Item", "Weather"],
        free: &["locn", "dateid", "ksn", "zip", "category", "snow"],
    },
    QueryEntry {
        id: "1Q1b",
        order: || path(&["ksn", "locn", "dateid"]),
        relations: &["Item", "Inventory", "Location", "Weather"],
        free: &["locn", "ksn", "category", "price"],
    },
    QueryEntry {
        id: "1Q1c",
        order: || path(&["ksn"]),
        relations: &["Item", "q2"],
        free: &["locn", "ksn", "category", "dateid", "rain", "zip"],
    },
    QueryEntry {
        id: "3",
        order: || path(&["ksn"]),
        relations: &["Item", "Inventory"],
        free: &["locn", "dateid", "ksn", "category", "price"],
    },
    QueryEntry {
        id: "3Q1c",
        order: || path(&["locn", "dateid"]),
        relations: &["R3q2", "Weather", "Location"],
        free: &["locn", "dateid", "rain", "zip", "category", "ksn"],
    },
    QueryEntry {
        id: "4Q1a",
        order: || path(&["ksn", "locn"]),
        relations: &["Item", "Inventory", "Location"],
        free: &["locn", "ksn", "category", "zip"],
    },
    QueryEntry {
        id: "4Q1b",
        order: || path(&["locn", "ksn"]),
        relations: &["Item", "Inventory", "Location"],
        free: &["locn", "ksn", "category", "zip"],
    },
    QueryEntry {
        id: "4Q2",
        order: || path(&["ksn"]),
        relations: &["Item", "Inventory"],
        free: &["locn", "ksn", "category", "price"],
    },
    QueryEntry {
        id: "aggr-Q1",
        order: || path(&["ksn"]),
        relations: &["Inventory"],
        free: &["ksn"],
    },
];

const GROUPS: &[GroupEntry] = &[
    GroupEntry {
        name: "tpch",
        catalog: tpch::catalog,
        sql_types: tpch::sql_types,
        queries: TPCH,
    },
    GroupEntry {
        name: "tpch-ext",
        catalog: tpch::catalog,
        sql_types: tpch::sql_types,
        queries: TPCH_EXT,
    },
    GroupEntry {
        name: "retailer",
        catalog: retailer::catalog,
        sql_types: retailer_sql_types,
        queries: RETAILER,
    },
];

/// Built-in groups and their query ids, in registry order.
pub fn groups() -> Vec<(&'static str, Vec<&'static str>)> {
    GROUPS
        .iter()
        .map(|g| (g.name, g.queries.iter().map(|q| q.id).collect()))
        .collect()
}

pub fn lookup(group: &str, query: &str) -> Result<RegisteredQuery> {
    let unknown = || Error::UnknownQuery {
        group: group.to_string(),
        query: query.to_string(),
    };
    let g = GROUPS.iter().find(|g| g.name == group).ok_or_else(unknown)?;
    let q = g.queries.iter().find(|q| q.id == query).ok_or_else(unknown)?;

    let relations = (g.catalog)().resolve(q.relations)?;
    Ok(RegisteredQuery {
        definition: QueryDefinition::new(
            group,
            query,
            (q.order)(),
            relations,
            q.free.iter().copied(),
        ),
        sql_types: (g.sql_types)(),
    })
}

#[cfg(test)]
mod tests {
    use fivmgen_vo::InsertPolicy;

    use super::*;

    #[test]
    fn path_builds_a_linear_seed() {
        let seed = path(&["a", "b", "c"]);
        assert_eq!(seed.names(), ["a", "b", "c"]);
        assert_eq!(seed.children.len(), 1);
    }

    #[test]
    fn every_registered_query_builds() {
        for (group, ids) in groups() {
            for id in ids {
                let q = lookup(group, id).unwrap();
                for policy in [InsertPolicy::Config, InsertPolicy::ExclusiveChains] {
                    q.definition
                        .build(policy)
                        .unwrap_or_else(|e| panic!("{group}/{id}: {e}"));
                }
            }
        }
    }

    #[test]
    fn unknown_query_is_reported() {
        assert!(matches!(
            lookup("tpch", "Q99"),
            Err(Error::UnknownQuery { .. })
        ));
        assert!(lookup("imdb", "Q1").is_err());
    }
}

//! TPC-H schemas and their SQL column spellings.

use fivmgen_codegen::SqlTypeTable;
use fivmgen_core::schema::AttrType::{Char, Double, Int, String as Str};
use fivmgen_core::schema::{Catalog, RelationSchema};

use crate::relation;

pub fn part() -> RelationSchema {
    relation(
        "part",
        &[
            ("partkey", Int),
            ("p_name", Str),
            ("p_mfgr", Str),
            ("p_brand", Str),
            ("p_type", Str),
            ("p_size", Int),
            ("p_container", Str),
            ("p_retailprice", Double),
            ("p_comment", Str),
        ],
        &["partkey"],
    )
}

pub fn supplier() -> RelationSchema {
    relation(
        "supplier",
        &[
            ("suppkey", Int),
            ("s_name", Str),
            ("s_address", Str),
            ("s_nationkey", Int),
            ("s_phone", Str),
            ("s_acctbal", Double),
            ("s_comment", Str),
        ],
        &["suppkey", "s_nationkey"],
    )
}

pub fn partsupp() -> RelationSchema {
    relation(
        "partsupp",
        &[
            ("partkey", Int),
            ("suppkey", Int),
            ("ps_availqty", Int),
            ("ps_supplycost", Double),
            ("ps_comment", Str),
        ],
        &["partkey", "suppkey"],
    )
}

pub fn customer() -> RelationSchema {
    relation(
        "customer",
        &[
            ("custkey", Int),
            ("c_name", Str),
            ("c_address", Str),
            ("nationkey", Int),
            ("c_phone", Str),
            ("c_acctbal", Double),
            ("c_mktsegment", Str),
            ("c_comment", Str),
        ],
        &["custkey", "nationkey"],
    )
}

pub fn orders() -> RelationSchema {
    relation(
        "orders",
        &[
            ("orderkey", Int),
            ("custkey", Int),
            ("o_orderstatus", Char),
            ("o_totalprice", Double),
            ("o_orderdate", Str),
            ("o_orderpriority", Str),
            ("o_clerk", Str),
            ("o_shippriority", Int),
            ("o_comment", Str),
        ],
        &["orderkey"],
    )
}

pub fn lineitem() -> RelationSchema {
    relation(
        "lineitem",
        &[
            ("orderkey", Int),
            ("partkey", Int),
            ("suppkey", Int),
            ("l_linenumber", Int),
            ("l_quantity", Double),
            ("l_extendedprice", Double),
            ("l_discount", Double),
            ("l_tax", Double),
            ("l_returnflag", Char),
            ("l_linestatus", Char),
            ("l_shipdate", Str),
            ("l_commitdate", Str),
            ("l_receiptdate", Str),
            ("l_shipinstruct", Str),
            ("l_shipmode", Str),
            ("l_comment", Str),
        ],
        &["orderkey", "partkey", "suppkey"],
    )
}

pub fn nation() -> RelationSchema {
    relation(
        "nation",
        &[
            ("nationkey", Int),
            ("n_name", Str),
            ("regionkey", Int),
            ("n_comment", Str),
        ],
        &["nationkey"],
    )
}

pub fn region() -> RelationSchema {
    relation(
        "region",
        &[("regionkey", Int), ("r_name", Str), ("r_comment", Str)],
        &["regionkey"],
    )
}

/// Pre-joined lineitem/orders view used by the 1Q1c experiment.
pub fn view_q2() -> RelationSchema {
    relation(
        "q2",
        &[
            ("orderkey", Int),
            ("partkey", Int),
            ("suppkey", Int),
            ("l_quantity", Double),
            ("o_totalprice", Double),
        ],
        &["partkey", "suppkey"],
    )
}

pub fn catalog() -> Catalog {
    Catalog::new()
        .with(part())
        .with(supplier())
        .with(partsupp())
        .with(customer())
        .with(orders())
        .with(lineitem())
        .with(nation())
        .with(region())
        .with(view_q2())
}

/// Column spellings used by the engine's TPC-H loaders.
pub fn sql_types() -> SqlTypeTable {
    SqlTypeTable::from_pairs(&[
        ("custkey", "INT"),
        ("c_name", "VARCHAR(25)"),
        ("c_address", "VARCHAR(40)"),
        ("nationkey", "INT"),
        ("s_nationkey", "INT"),
        ("c_phone", "CHAR(15)"),
        ("c_acctbal", "DECIMAL"),
        ("c_mktsegment", "CHAR(10)"),
        ("c_comment", "VARCHAR(117)"),
        ("orderkey", "INT"),
        ("partkey", "INT"),
        ("suppkey", "INT"),
        ("l_linenumber", "INT"),
        ("l_quantity", "DECIMAL"),
        ("l_extendedprice", "DECIMAL"),
        ("l_discount", "DECIMAL"),
        ("l_tax", "DECIMAL"),
        ("l_returnflag", "CHAR(1)"),
        ("l_linestatus", "CHAR(1)"),
        ("l_shipdate", "CHAR(10)"),
        ("l_commitdate", "CHAR(10)"),
        ("l_receiptdate", "CHAR(10)"),
        ("l_shipinstruct", "CHAR(25)"),
        ("l_shipmode", "CHAR(10)"),
        ("l_comment", "VARCHAR(44)"),
        ("p_name", "VARCHAR(55)"),
        ("p_mfgr", "CHAR(25)"),
        ("p_brand", "CHAR(10)"),
        ("p_type", "VARCHAR(25)"),
        ("p_size", "INT"),
        ("p_container", "CHAR(10)"),
        ("p_retailprice", "DECIMAL"),
        ("p_comment", "VARCHAR(23)"),
        ("ps_availqty", "INT"),
        ("ps_supplycost", "DECIMAL"),
        ("ps_comment", "VARCHAR(199)"),
        ("s_name", "CHAR(25)"),
        ("s_address", "VARCHAR(40)"),
        ("s_phone", "CHAR(15)"),
        ("s_acctbal", "DECIMAL"),
        ("s_comment", "VARCHAR(101)"),
        ("o_custkey", "INT"),
        ("o_orderstatus", "CHAR(1)"),
        ("o_totalprice", "DECIMAL"),
        ("o_orderdate", "CHAR(10)"),
        ("o_orderpriority", "CHAR(15)"),
        ("o_clerk", "CHAR(15)"),
        ("o_shippriority", "INT"),
        ("o_comment", "VARCHAR(79)"),
        ("n_name", "CHAR(25)"),
        ("regionkey", "INT"),
        ("n_comment", "VARCHAR(152)"),
        ("r_name", "CHAR(25)"),
        ("r_comment", "VARCHAR(152)"),
    ])
}

//! Config and SQL artifacts through the `compile` entry point

use fivmgen::core::error::Error;
use fivmgen::core::fingerprint::Fingerprint;
use fivmgen::core::schema::{AttrType, RelationSchema};
use fivmgen::{
    compile, compile_registered, CompileConfig, CompileRequest, OutputMode, QueryDefinition,
    SeedNode, SqlTypeTable,
};

fn rel(name: &str, attrs: &[(&str, AttrType)]) -> RelationSchema {
    RelationSchema::from_pairs(name, attrs, &[]).unwrap()
}

fn run(q: &QueryDefinition, types: &SqlTypeTable, mode: OutputMode) -> fivmgen::Result<String> {
    let config = CompileConfig::default();
    compile(&CompileRequest {
        query: q,
        dataset_path: "./datasets/toy",
        mode,
        sql_types: types,
        config: &config,
    })
}

fn select_body(sql: &str) -> &str {
    let start = sql.find("SELECT SUM(\n").unwrap() + "SELECT SUM(\n".len();
    let end = sql.rfind("\n)\nFROM").unwrap();
    &sql[start..end]
}

#[test]
fn test_example_one_config_text() {
    let q = QueryDefinition::new(
        "test",
        "ex1",
        SeedNode::leaf("x"),
        vec![
            rel("A", &[("x", AttrType::Int), ("y", AttrType::Int)]),
            rel("B", &[("y", AttrType::Int), ("z", AttrType::Double)]),
        ],
        ["x", "z"],
    );
    let text = run(&q, &SqlTypeTable::derive(&q.relations), OutputMode::Config).unwrap();
    assert_eq!(
        text,
        "3 2\n0 x int -1 {} 0\n1 y int 0 {0} 0\n2 z double 1 {0,1} 0\nA 1 x,y\nB 2 y,z\n"
    );
}

#[test]
fn test_example_one_join_variable_breaks_the_chain() {
    // y is joined by both A and B, so it gets its own unary factor and only
    // the private leaf z is lifted as a run.
    let q = QueryDefinition::new(
        "test",
        "ex1",
        SeedNode::leaf("x"),
        vec![
            rel("A", &[("x", AttrType::Int), ("y", AttrType::Int)]),
            rel("B", &[("y", AttrType::Int), ("z", AttrType::Double)]),
        ],
        ["x", "z"],
    );
    let sql = run(&q, &SqlTypeTable::derive(&q.relations), OutputMode::Sql).unwrap();
    assert_eq!(
        select_body(&sql),
        "\t[lift<0>: RingFactorizedRelation<[0, INT]>](x) *\n\
         \t[lift<1>: RingFactorizedRelation<[1, INT]>](y) *\n\
         \t[lift<2>: RingFactorizedRelation<[2, DECIMAL]>](z)"
    );
    assert!(sql.ends_with(")\nFROM A NATURAL JOIN B;\n"));
}

#[test]
fn test_example_two_single_lift() {
    let q = QueryDefinition::new(
        "test",
        "ex2",
        SeedNode::leaf("p"),
        vec![rel(
            "C",
            &[("p", AttrType::Int), ("q", AttrType::Int), ("r", AttrType::Int)],
        )],
        ["p", "q", "r"],
    );
    let sql = run(&q, &SqlTypeTable::derive(&q.relations), OutputMode::Sql).unwrap();
    let body = select_body(&sql);
    assert_eq!(body.matches("lift<").count(), 1);
    assert_eq!(
        body,
        "\t[lift<0>: RingFactorizedRelation<[0, INT,INT,INT]>](p,q,r)"
    );
    assert!(sql.ends_with("FROM C;\n"));
}

#[test]
fn test_product_is_well_formed() {
    let sql = compile_registered("tpch", "Q7", "tpch_0_01", OutputMode::Sql).unwrap();
    let body = select_body(&sql);
    let factors: Vec<&str> = body.split(" *\n").collect();
    assert!(factors.len() > 1);
    for f in &factors {
        assert!(f.starts_with("\t[lift<"), "{f:?}");
        assert!(f.ends_with(')'), "{f:?}");
        assert!(!f.contains('\n'));
    }
    assert!(!body.ends_with('*'));
}

#[test]
fn test_every_relation_gets_a_stream() {
    let sql = compile_registered("tpch", "Q3", "tpch_0_01", OutputMode::Sql).unwrap();
    for r in ["orders", "customer", "lineitem"] {
        assert!(sql.contains(&format!("CREATE STREAM {r} (\n")), "{r}");
        assert!(sql.contains(&format!("FROM FILE './datasets/tpch_0_01/{r}.csv'")));
    }
    assert!(sql.starts_with("IMPORT DTREE FROM FILE 'tpch-Q3.txt';\n"));
}

#[test]
fn test_config_header_counts_attributes_and_relations() {
    let text = compile_registered("tpch", "Q1", "tpch_0_01", OutputMode::Config).unwrap();
    let header = text.lines().next().unwrap();
    let q = fivmgen::lookup("tpch", "Q1").unwrap();
    let vars = fivmgen::core::schema::distinct_attributes(&q.definition.relations).len();
    assert_eq!(header, format!("{vars} {}", q.definition.relations.len()));
    let nodes = q
        .definition
        .build(fivmgen::InsertPolicy::Config)
        .unwrap()
        .tree
        .len();
    assert_eq!(text.lines().count(), 1 + nodes + q.definition.relations.len());
}

#[test]
fn test_output_is_deterministic() {
    for mode in [OutputMode::Config, OutputMode::Sql] {
        let a = compile_registered("retailer", "all", "retailer", mode).unwrap();
        let b = compile_registered("retailer", "all", "retailer", mode).unwrap();
        assert_eq!(Fingerprint::of_artifact(&a), Fingerprint::of_artifact(&b));
    }
}

#[test]
fn test_missing_sql_type_fails() {
    let q = QueryDefinition::new(
        "test",
        "gap",
        SeedNode::leaf("x"),
        vec![rel("A", &[("x", AttrType::Int), ("y", AttrType::Int)])],
        ["x"],
    );
    let types = SqlTypeTable::from_pairs(&[("x", "INT")]);
    let err = run(&q, &types, OutputMode::Sql).unwrap_err();
    assert!(matches!(err, Error::SchemaLookup { .. }), "{err}");
    // The config artifact does not consult the dialect.
    assert!(run(&q, &types, OutputMode::Config).is_ok());
}

#[test]
fn test_unknown_query_is_reported() {
    let err = compile_registered("tpch", "Q99", "tpch_0_01", OutputMode::Config).unwrap_err();
    assert!(matches!(err, Error::UnknownQuery { .. }));
}

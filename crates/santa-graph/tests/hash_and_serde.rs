use santa_graph::{
    canonical_hash, graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json,
    ConstraintGraph,
};

#[test]
fn hash_ignores_pair_order_and_direction() {
    let a = ConstraintGraph::build([("Kate", "Sandra"), ("Calvin", "Janis")]);
    let b = ConstraintGraph::build([("Janis", "Calvin"), ("Sandra", "Kate"), ("Kate", "Sandra")]);
    assert_eq!(canonical_hash(&a), canonical_hash(&b));

    let c = ConstraintGraph::build([("Kate", "Sandra")]);
    assert_ne!(canonical_hash(&a), canonical_hash(&c));
}

#[test]
fn json_payload_lists_canonical_pairs() {
    let graph = ConstraintGraph::build([("Sandra", "Kate")]);
    let json = graph_to_json(&graph).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["pairs"], serde_json::json!([["Kate", "Sandra"]]));

    let restored = graph_from_json(&json).unwrap();
    assert_eq!(restored, graph);
}

#[test]
fn bytes_restore_the_same_relation() {
    let graph = ConstraintGraph::build([("Eric", "Katharina"), ("Chelsea", "Ryan")]);
    let restored = graph_from_bytes(&graph_to_bytes(&graph).unwrap()).unwrap();
    assert_eq!(canonical_hash(&restored), canonical_hash(&graph));
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = graph_from_json("{\"pairs\": 3}").unwrap_err();
    assert_eq!(err.code(), "deserialize-json");
}

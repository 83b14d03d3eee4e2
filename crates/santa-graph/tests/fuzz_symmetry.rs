use santa_graph::ConstraintGraph;
use proptest::prelude::*;

proptest! {
    #[test]
    fn relation_is_always_symmetric(pairs in prop::collection::vec((0u8..8, 0u8..8), 0..24)) {
        let named: Vec<(String, String)> = pairs
            .iter()
            .map(|(a, b)| (format!("p{a}"), format!("p{b}")))
            .collect();
        let graph = ConstraintGraph::build(named.clone());

        for a in 0u8..8 {
            for b in 0u8..8 {
                let (x, y) = (format!("p{a}"), format!("p{b}"));
                let listed = named.iter().any(|(p, q)| (p == &x && q == &y) || (p == &y && q == &x));
                prop_assert_eq!(graph.forbidden(x.as_str(), y.as_str()), listed);
                prop_assert_eq!(graph.forbidden(x.as_str(), y.as_str()), graph.forbidden(y.as_str(), x.as_str()));
            }
        }
    }
}

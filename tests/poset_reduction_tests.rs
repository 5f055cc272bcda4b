// Copyright 2025 Cowboy AI, LLC.

use std::collections::BTreeSet;

use cim_catgraph::graph::{closure, contract, pairwise_classes, reduce, tarjan};
use cim_catgraph::poset::{parse_chains, simplify, to_dot, Functor};
use cim_catgraph::{CatGraphError, GraphStore};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn edges(pairs: &[(&str, &str)]) -> BTreeSet<(String, String)> {
    pairs
        .iter()
        .map(|(u, v)| (u.to_string(), v.to_string()))
        .collect()
}

fn arbitrary_graph() -> impl Strategy<Value = GraphStore> {
    proptest::collection::vec((0u8..8, 0u8..8), 0..24).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(u, v)| (format!("v{u}"), format!("v{v}")))
            .collect()
    })
}

fn arbitrary_dag() -> impl Strategy<Value = GraphStore> {
    proptest::collection::vec((0u8..10, 0u8..10), 0..30).prop_map(|pairs| {
        pairs
            .into_iter()
            .filter(|(u, v)| u < v)
            .map(|(u, v)| (format!("v{u}"), format!("v{v}")))
            .collect()
    })
}

#[test]
fn cycle_collapses_to_single_vertex_without_edges() {
    let graph = parse_chains("a ≤ b\nb ≤ c\nc ≤ a").unwrap();
    let quotient = contract(graph);
    assert_eq!(quotient.order, vec!["a = b = c".to_string()]);
    assert!(!quotient.graph.has_edge("a = b = c", "a = b = c"));

    let simplified = simplify(parse_chains("a ≤ b\nb ≤ c\nc ≤ a").unwrap());
    assert_eq!(simplified.reduced.edge_set(), BTreeSet::new());
    assert_eq!(simplified.order, vec!["a = b = c".to_string()]);
}

#[test]
fn diamond_keeps_only_covering_edges() {
    let graph = parse_chains("a ≤ b\na ≤ c\nb ≤ d\nc ≤ d").unwrap();
    let quotient = contract(graph);
    let closed = closure(&quotient.graph, &quotient.order);
    assert!(closed.has_edge("a", "d"));

    let reduced = reduce(&closed, &quotient.order);
    assert_eq!(
        reduced.edge_set(),
        edges(&[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")])
    );
}

#[test]
fn merged_vertex_is_rewired_between_neighbours() {
    let graph = parse_chains("# loop in the middle\nx ≤ a ≤ b ≤ a ≤ y").unwrap();
    let simplified = simplify(graph);
    assert_eq!(
        simplified.reduced.edge_set(),
        edges(&[("x", "a = b"), ("a = b", "y")])
    );
    assert_eq!(
        to_dot(&simplified.reduced),
        "digraph {\n\"a = b\" -> \"y\";\n\"x\" -> \"a = b\";\n}"
    );
}

#[test]
fn singleton_self_loop_survives_simplification() {
    let simplified = simplify(parse_chains("a ≤ a\na ≤ b").unwrap());
    assert_eq!(simplified.reduced.edge_set(), edges(&[("a", "a"), ("a", "b")]));
}

#[test]
fn long_chain_does_not_exhaust_the_stack() {
    let labels: Vec<String> = (0..2_000).map(|i| format!("n{i}")).collect();
    let mut graph = GraphStore::new();
    graph.add_chain(labels.iter().map(String::as_str));
    graph.add_edge("n1999", "n0");
    let quotient = contract(graph);
    assert_eq!(quotient.order.len(), 1);
    assert_eq!(quotient.graph.edge_count(), 0);
    assert_eq!(quotient.merged().next().map(|c| c.len()), Some(labels.len()));
}

#[test]
fn topological_order_follows_the_chain() {
    let labels: Vec<String> = (0..200).map(|i| format!("n{i}")).collect();
    let mut graph = GraphStore::new();
    graph.add_chain(labels.iter().map(String::as_str));
    let simplified = simplify(graph);
    assert_eq!(simplified.order, labels);
    assert_eq!(simplified.reduced.edge_count(), labels.len() - 1);
}

#[test]
fn functor_between_simplified_posets() {
    let source = simplify(parse_chains("a ≤ b ≤ c").unwrap()).reduced;
    let target = simplify(parse_chains("x ≤ y").unwrap()).reduced;

    let good = Functor::parse("a → x\nb → y\nc → y").unwrap();
    assert!(good.check(&source, &target).is_ok());

    let bad = Functor::parse("a → y\nb → x\nc → y").unwrap();
    match bad.check(&source, &target) {
        Err(CatGraphError::FunctorViolation { source_edge, image }) => {
            assert_eq!(source_edge, ("a".to_string(), "b".to_string()));
            assert_eq!(image, ("y".to_string(), "x".to_string()));
        }
        other => panic!("expected a functor violation, got {other:?}"),
    }
}

proptest! {
    #[test]
    fn reduction_is_idempotent(graph in arbitrary_dag()) {
        let quotient = contract(graph);
        let once = reduce(&closure(&quotient.graph, &quotient.order), &quotient.order);
        let twice = reduce(&closure(&once, &quotient.order), &quotient.order);
        prop_assert_eq!(once.edge_set(), twice.edge_set());
    }

    #[test]
    fn reduction_preserves_reachability(graph in arbitrary_graph()) {
        let quotient = contract(graph);
        let closed = closure(&quotient.graph, &quotient.order);
        let reduced = reduce(&closed, &quotient.order);
        prop_assert_eq!(closure(&reduced, &quotient.order).edge_set(), closed.edge_set());
    }

    #[test]
    fn contraction_is_a_fixed_point(graph in arbitrary_graph()) {
        let quotient = contract(graph);
        let again = contract(quotient.graph.clone());
        prop_assert_eq!(again.merged().count(), 0);
        prop_assert_eq!(again.graph.edge_set(), quotient.graph.edge_set());
    }

    #[test]
    fn merged_vertex_inherits_member_neighbours(graph in arbitrary_graph()) {
        let quotient = contract(graph.clone());
        let class = |v: &str| quotient.class_of(v).unwrap_or_else(|| v.to_string());

        for component in quotient.merged() {
            let label = component.label();
            let expected_in: BTreeSet<String> = component
                .members()
                .flat_map(|m| graph.incoming(m).into_iter().map(str::to_string).collect::<Vec<_>>())
                .filter(|u| !component.contains(u))
                .map(|u| class(&u))
                .collect();
            let expected_out: BTreeSet<String> = component
                .members()
                .flat_map(|m| graph.outgoing(m).map(str::to_string).collect::<Vec<_>>())
                .filter(|v| !component.contains(v))
                .map(|v| class(&v))
                .collect();

            let actual_in: BTreeSet<String> =
                quotient.graph.incoming(&label).into_iter().map(str::to_string).collect();
            let actual_out: BTreeSet<String> =
                quotient.graph.outgoing(&label).map(str::to_string).collect();
            prop_assert_eq!(actual_in, expected_in);
            prop_assert_eq!(actual_out, expected_out);
        }
    }

    #[test]
    fn pairwise_check_agrees_with_tarjan(graph in arbitrary_graph()) {
        let mut from_tarjan: Vec<_> = tarjan(&graph).into_iter().filter(|c| !c.is_trivial()).collect();
        from_tarjan.sort();
        prop_assert_eq!(pairwise_classes(&graph), from_tarjan);
    }
}

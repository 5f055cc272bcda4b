// Copyright 2025 Cowboy AI, LLC.

//! Preorders written as chains, and their simplification
//!
//! Input is line oriented: `#` starts a comment line, every other line is a
//! chain `a ≤ b ≤ c`. Simplifying a preorder collapses its isomorphism
//! classes, then keeps only covering edges, giving a Hasse diagram.
//!
//! ```text
//! chains ─▶ GraphStore ─▶ contract ─▶ closure ─▶ reduce ─▶ DOT / packed JSON
//! ```

pub mod functor;
pub mod packed;

use tracing::info;

use crate::errors::{CatGraphError, CatGraphResult};
use crate::graph::{closure, contract, reduce, Component, GraphStore};

pub use functor::Functor;
pub use packed::{from_packed_json, to_packed_json, PackedPoset};

/// Separator between chain elements
pub const CHAIN_SEPARATOR: char = '≤';

/// Parse chain text into a graph
pub fn parse_chains(text: &str) -> CatGraphResult<GraphStore> {
    let mut graph = GraphStore::new();
    for (n, line) in text.lines().enumerate() {
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }
        let chain: Vec<&str> = line.split(CHAIN_SEPARATOR).map(str::trim).collect();
        if chain.iter().any(|label| label.is_empty()) {
            return Err(CatGraphError::parse(n + 1, "empty label in chain"));
        }
        if let [single] = chain.as_slice() {
            graph.add_vertex(*single);
        } else {
            graph.add_chain(chain);
        }
    }
    Ok(graph)
}

/// Result of simplifying a preorder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simplified {
    /// Covering edges between (possibly merged) vertices
    pub reduced: GraphStore,
    /// Vertex labels in topological order
    pub order: Vec<String>,
    /// Strongly connected components of the input
    pub components: Vec<Component>,
}

/// Contract cycles, close, then reduce
pub fn simplify(graph: GraphStore) -> Simplified {
    let quotient = contract(graph);
    let closed = closure(&quotient.graph, &quotient.order);
    let reduced = reduce(&closed, &quotient.order);

    info!(
        vertices = quotient.order.len(),
        merged = quotient.merged().count(),
        covering_edges = reduced.edge_count(),
        "simplified preorder"
    );

    Simplified {
        reduced,
        order: quotient.order,
        components: quotient.components,
    }
}

/// Render edges as a DOT digraph, sorted by label
pub fn to_dot(graph: &GraphStore) -> String {
    let mut edges: Vec<(&str, &str)> = graph.edges().collect();
    edges.sort_unstable();

    let mut lines = Vec::with_capacity(edges.len() + 2);
    lines.push("digraph {".to_string());
    for (u, v) in edges {
        lines.push(format!("\"{}\" -> \"{}\";", escape(u), escape(v)));
    }
    lines.push("}".to_string());
    lines.join("\n")
}

pub(crate) fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

// Copyright 2025 Cowboy AI, LLC.

//! Transitive closure and covering reduction
//!
//! Both operations walk vertices in a caller-supplied topological order, as
//! produced by [`contract`](super::contract). Reachability answers are
//! memoized in a [`Reachability`] value that borrows the graph it describes,
//! so the cache can never outlive a mutation of that graph.

use std::collections::{HashMap, HashSet};

use indexmap::IndexSet;
use tracing::debug;

use super::GraphStore;

/// Memoized reachability over one graph
///
/// `v` is reachable from `u` when a path of one or more edges leads from `u`
/// to `v`. Full reachable sets are cached per source vertex.
pub struct Reachability<'g> {
    graph: &'g GraphStore,
    reached: HashMap<String, HashSet<&'g str>>,
}

impl<'g> Reachability<'g> {
    /// Start with an empty cache
    pub fn new(graph: &'g GraphStore) -> Self {
        Self {
            graph,
            reached: HashMap::new(),
        }
    }

    /// Every vertex reachable from `u`
    pub fn reachable_from(&mut self, u: &str) -> &HashSet<&'g str> {
        if !self.reached.contains_key(u) {
            let found = self.search(u);
            self.reached.insert(u.to_string(), found);
        }
        &self.reached[u]
    }

    /// Whether `v` is reachable from `u`
    pub fn is_reachable(&mut self, u: &str, v: &str) -> bool {
        self.reachable_from(u).contains(v)
    }

    /// Number of source vertices with a cached answer
    pub fn cached(&self) -> usize {
        self.reached.len()
    }

    fn search(&self, u: &str) -> HashSet<&'g str> {
        let mut seen: HashSet<&'g str> = HashSet::new();
        let mut stack: Vec<&'g str> = self.graph.outgoing(u).collect();

        while let Some(w) = stack.pop() {
            if !seen.insert(w) {
                continue;
            }
            if let Some(known) = self.reached.get(w) {
                seen.extend(known.iter().copied());
                continue;
            }
            stack.extend(self.graph.outgoing(w).filter(|x| !seen.contains(x)));
        }
        seen
    }
}

/// Transitive closure restricted to forward pairs of `order`
///
/// Adds `u → v` whenever `u` precedes `v` in `order` and `v` is reachable
/// from `u`. A self-loop on `u` is carried over. Every vertex of `order`
/// becomes a key of the result.
pub fn closure(graph: &GraphStore, order: &[String]) -> GraphStore {
    let mut reach = Reachability::new(graph);
    let mut closed = GraphStore::new();

    for (i, u) in order.iter().enumerate() {
        closed.add_vertex(u.as_str());
        if reach.is_reachable(u, u) {
            closed.add_edge(u.as_str(), u.as_str());
        }
        for v in &order[i + 1..] {
            if reach.is_reachable(u, v) {
                closed.add_edge(u.as_str(), v.as_str());
            }
        }
    }

    debug!(
        vertices = order.len(),
        edges = closed.edge_count(),
        cached = reach.cached(),
        "computed transitive closure"
    );
    closed
}

/// Covering reduction of a transitively closed graph
///
/// For each `u`, a successor `v2` is dropped when another successor `v1`
/// also reaches it (`u → v1 → v2`). The drop test only reads the closed
/// input, so the result does not depend on pair visiting order.
pub fn reduce(closed: &GraphStore, order: &[String]) -> GraphStore {
    let mut reduced = GraphStore::new();

    for u in order {
        let successors: Vec<&str> = closed.outgoing(u).filter(|v| *v != u.as_str()).collect();
        let mut kept: IndexSet<String> = successors.iter().map(|v| v.to_string()).collect();

        for (i, &v1) in successors.iter().enumerate() {
            for &v2 in &successors[i + 1..] {
                if closed.has_edge(v1, v2) {
                    kept.shift_remove(v2);
                } else if closed.has_edge(v2, v1) {
                    kept.shift_remove(v1);
                }
            }
        }
        if closed.has_edge(u, u) {
            kept.insert(u.clone());
        }
        reduced.set_successors(u.as_str(), kept);
    }

    debug!(edges = reduced.edge_count(), "computed transitive reduction");
    reduced
}

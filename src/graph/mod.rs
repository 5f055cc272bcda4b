// Copyright 2025 Cowboy AI, LLC.

//! Directed graphs over string labels
//!
//! [`GraphStore`] is an adjacency-set graph: each key maps to the set of its
//! successors, so duplicate edges collapse. Iteration follows insertion order,
//! which keeps traversal and component order reproducible between runs.
//!
//! - [`scc`] contracts strongly connected components into merged vertices
//! - [`closure`] computes transitive closure and covering reduction

pub mod closure;
pub mod scc;

use std::collections::BTreeSet;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

pub use closure::{closure, reduce, Reachability};
pub use scc::{contract, pairwise_classes, tarjan, Component, Quotient};

/// Adjacency-set directed graph; edge `(u, v)` reads `u ≤ v`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphStore {
    adjacency: IndexMap<String, IndexSet<String>>,
}

impl GraphStore {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a vertex with no edges. Existing successors are kept.
    pub fn add_vertex(&mut self, v: impl Into<String>) {
        self.adjacency.entry(v.into()).or_default();
    }

    /// Add the edge `u → v`. Self-loops are legal.
    pub fn add_edge(&mut self, u: impl Into<String>, v: impl Into<String>) {
        self.adjacency.entry(u.into()).or_default().insert(v.into());
    }

    /// Add an edge between every consecutive pair of the chain
    pub fn add_chain<I, S>(&mut self, chain: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut previous: Option<String> = None;
        for label in chain {
            let label = label.into();
            if let Some(u) = previous.take() {
                self.add_edge(u, label.clone());
            }
            previous = Some(label);
        }
    }

    /// Every label appearing as a key or as any successor, keys first
    pub fn vertices(&self) -> IndexSet<&str> {
        let mut all: IndexSet<&str> = self.adjacency.keys().map(String::as_str).collect();
        for successors in self.adjacency.values() {
            all.extend(successors.iter().map(String::as_str));
        }
        all
    }

    /// Whether the label is a key or a successor
    pub fn contains_vertex(&self, v: &str) -> bool {
        self.adjacency.contains_key(v) || self.adjacency.values().any(|s| s.contains(v))
    }

    /// Whether the edge `u → v` exists
    pub fn has_edge(&self, u: &str, v: &str) -> bool {
        self.adjacency.get(u).is_some_and(|s| s.contains(v))
    }

    /// Successors of `v`
    pub fn outgoing<'a>(&'a self, v: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.adjacency
            .get(v)
            .into_iter()
            .flat_map(|s| s.iter().map(String::as_str))
    }

    /// Predecessors of `v`
    pub fn incoming(&self, v: &str) -> IndexSet<&str> {
        self.adjacency
            .iter()
            .filter(|(_, successors)| successors.contains(v))
            .map(|(u, _)| u.as_str())
            .collect()
    }

    /// Remove `v` as a key and from every successor set
    pub fn delete(&mut self, v: &str) -> bool {
        let mut removed = self.adjacency.shift_remove(v).is_some();
        for successors in self.adjacency.values_mut() {
            removed |= successors.shift_remove(v);
        }
        removed
    }

    /// All edges as `(u, v)` pairs
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.adjacency
            .iter()
            .flat_map(|(u, vs)| vs.iter().map(move |v| (u.as_str(), v.as_str())))
    }

    /// Edges as an ordered set, for order-independent comparison
    pub fn edge_set(&self) -> BTreeSet<(String, String)> {
        self.edges()
            .map(|(u, v)| (u.to_string(), v.to_string()))
            .collect()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(IndexSet::len).sum()
    }

    /// Whether the graph has no vertices at all
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Replace the successor set of `v` wholesale
    pub(crate) fn set_successors(&mut self, v: impl Into<String>, successors: IndexSet<String>) {
        self.adjacency.insert(v.into(), successors);
    }
}

impl<S: Into<String>> FromIterator<(S, S)> for GraphStore {
    fn from_iter<I: IntoIterator<Item = (S, S)>>(iter: I) -> Self {
        let mut graph = GraphStore::new();
        for (u, v) in iter {
            graph.add_edge(u, v);
        }
        graph
    }
}

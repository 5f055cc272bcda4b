// Copyright 2025 Cowboy AI, LLC.

//! Strongly connected components and quotient graphs
//!
//! A preorder can contain cycles (`a ≤ b ≤ a`). Every strongly connected
//! component of two or more vertices is an isomorphism class, and collapsing
//! each class into one merged vertex turns the graph into a DAG. The merged
//! label is the sorted member labels joined with `" = "`.
//!
//! [`tarjan`] uses an explicit heap-allocated work stack; chain-shaped input
//! of N elements would otherwise need recursion depth N.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::closure::Reachability;
use super::GraphStore;

/// Separator between member labels of a merged vertex
pub const MERGE_SEPARATOR: &str = " = ";

/// A set of mutually reachable vertices
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Component(BTreeSet<String>);

impl Component {
    /// Build a component from its members
    pub fn new<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(members.into_iter().map(Into::into).collect())
    }

    /// Members in sorted order
    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Whether `v` is a member
    pub fn contains(&self, v: &str) -> bool {
        self.0.contains(v)
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for components produced by [`tarjan`]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Singletons pass through contraction unchanged
    pub fn is_trivial(&self) -> bool {
        self.0.len() < 2
    }

    /// Vertex label of the component after contraction
    pub fn label(&self) -> String {
        self.0
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(MERGE_SEPARATOR)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

struct Frame<'g> {
    vertex: &'g str,
    successors: Vec<&'g str>,
    next: usize,
}

#[derive(Default)]
struct TarjanState<'g> {
    counter: usize,
    index: HashMap<&'g str, usize>,
    low: HashMap<&'g str, usize>,
    stack: Vec<&'g str>,
    on_stack: HashSet<&'g str>,
    components: Vec<Component>,
}

impl<'g> TarjanState<'g> {
    fn enter(&mut self, graph: &'g GraphStore, v: &'g str) -> Frame<'g> {
        self.index.insert(v, self.counter);
        self.low.insert(v, self.counter);
        self.counter += 1;
        self.stack.push(v);
        self.on_stack.insert(v);
        Frame {
            vertex: v,
            successors: graph.outgoing(v).collect(),
            next: 0,
        }
    }

    fn lower(&mut self, v: &'g str, candidate: usize) {
        if let Some(low) = self.low.get_mut(v) {
            *low = (*low).min(candidate);
        }
    }

    fn finish(&mut self, v: &'g str) {
        if self.low.get(v) != self.index.get(v) {
            return;
        }
        let mut members = BTreeSet::new();
        while let Some(u) = self.stack.pop() {
            self.on_stack.remove(u);
            members.insert(u.to_string());
            if u == v {
                break;
            }
        }
        self.components.push(Component(members));
    }
}

/// Strongly connected components in reverse topological order
///
/// Each component is emitted only after every component reachable from it,
/// so reversing the result gives a topological order of the quotient.
pub fn tarjan(graph: &GraphStore) -> Vec<Component> {
    let mut state = TarjanState::default();

    for root in graph.vertices() {
        if state.index.contains_key(root) {
            continue;
        }
        let mut work = vec![state.enter(graph, root)];

        while let Some(frame) = work.last_mut() {
            if let Some(&w) = frame.successors.get(frame.next) {
                frame.next += 1;
                let v = frame.vertex;
                match state.index.get(w).copied() {
                    None => {
                        let child = state.enter(graph, w);
                        work.push(child);
                    }
                    Some(w_index) if state.on_stack.contains(w) => state.lower(v, w_index),
                    Some(_) => {}
                }
                continue;
            }

            let v = frame.vertex;
            work.pop();
            state.finish(v);
            if let Some(parent) = work.last() {
                let v_low = state.low.get(v).copied().unwrap_or(usize::MAX);
                state.lower(parent.vertex, v_low);
            }
        }
    }

    debug!(
        components = state.components.len(),
        "computed strongly connected components"
    );
    state.components
}

/// A graph with every non-trivial component merged into one vertex
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quotient {
    /// The contracted graph; a DAG apart from singleton self-loops
    pub graph: GraphStore,
    /// Vertex labels in topological order
    pub order: Vec<String>,
    /// Components in the order [`tarjan`] emitted them
    pub components: Vec<Component>,
}

impl Quotient {
    /// Label of the vertex that `v` was merged into
    pub fn class_of(&self, v: &str) -> Option<String> {
        self.components
            .iter()
            .find(|c| c.contains(v))
            .map(Component::label)
    }

    /// Whether `a ≤ b` and `b ≤ a` both hold in the input graph
    pub fn are_isomorphic(&self, a: &str, b: &str) -> bool {
        a == b
            || self
                .components
                .iter()
                .any(|c| !c.is_trivial() && c.contains(a) && c.contains(b))
    }

    /// The non-trivial components
    pub fn merged(&self) -> impl Iterator<Item = &Component> {
        self.components.iter().filter(|c| !c.is_trivial())
    }
}

/// Collapse every strongly connected component of two or more vertices
///
/// Edges between members of one component become internal and vanish; edges
/// crossing the component boundary are rewired to the merged vertex.
pub fn contract(mut graph: GraphStore) -> Quotient {
    let components = tarjan(&graph);

    for component in components.iter().filter(|c| !c.is_trivial()) {
        let merged = component.label();
        let mut incoming: IndexSet<String> = IndexSet::new();
        let mut outgoing: IndexSet<String> = IndexSet::new();

        for member in component.members() {
            incoming.extend(
                graph
                    .incoming(member)
                    .into_iter()
                    .filter(|u| !component.contains(u))
                    .map(str::to_string),
            );
            outgoing.extend(
                graph
                    .outgoing(member)
                    .filter(|v| !component.contains(v))
                    .map(str::to_string),
            );
        }
        for member in component.members() {
            graph.delete(member);
        }

        info!(
            vertex = %merged,
            incoming = incoming.len(),
            outgoing = outgoing.len(),
            "merged isomorphic vertices"
        );

        for u in incoming {
            graph.add_edge(u, merged.clone());
        }
        graph.set_successors(merged, outgoing);
    }

    let order = components.iter().rev().map(Component::label).collect();
    Quotient {
        graph,
        order,
        components,
    }
}

/// Isomorphism classes found by checking `u ≤ v` and `v ≤ u` for every pair
///
/// Quadratic in the vertex count; only the non-trivial classes are returned,
/// sorted. Agrees with the non-trivial components of [`tarjan`].
pub fn pairwise_classes(graph: &GraphStore) -> Vec<Component> {
    let vertices: Vec<&str> = graph.vertices().into_iter().collect();
    let mut reach = Reachability::new(graph);
    let mut assigned: HashSet<&str> = HashSet::new();
    let mut classes = Vec::new();

    for (i, &u) in vertices.iter().enumerate() {
        if assigned.contains(u) {
            continue;
        }
        let mut members = vec![u];
        for &v in &vertices[i + 1..] {
            if !assigned.contains(v) && reach.is_reachable(u, v) && reach.is_reachable(v, u) {
                members.push(v);
            }
        }
        if members.len() > 1 {
            assigned.extend(members.iter().copied());
            classes.push(Component::new(members));
        }
    }

    classes.sort();
    classes
}

// Copyright 2025 Cowboy AI, LLC.

//! Packed JSON encoding of a labeled DAG
//!
//! The encoding is a two element array `[labels, mask]`. Pairs `(labels[i],
//! labels[j])` with `i < j` are numbered in combinatorial order, so for
//! labels `a, b, c` the pairs are `(a,b)=0, (a,c)=1, (b,c)=2`. Bit `k` of the
//! mask is set when the graph has the edge from the first to the second
//! element of pair `k`. Only forward edges are representable, so labels are
//! expected in topological order.

use serde::{Deserialize, Serialize};

use crate::errors::{CatGraphError, CatGraphResult};
use crate::graph::GraphStore;

/// Bits available in the mask
pub const MASK_WIDTH: usize = u64::BITS as usize;

/// `[labels, mask]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackedPoset(pub Vec<String>, pub u64);

impl PackedPoset {
    /// Encode the forward edges of `graph` over `labels`
    pub fn encode(graph: &GraphStore, labels: &[String]) -> CatGraphResult<Self> {
        check_width(labels.len())?;
        let mut mask = 0u64;
        for (bit, (u, v)) in pairs(labels).enumerate() {
            if graph.has_edge(u, v) {
                mask |= 1 << bit;
            }
        }
        Ok(Self(labels.to_vec(), mask))
    }

    /// Rebuild the graph; every label becomes a vertex
    pub fn decode(&self) -> CatGraphResult<GraphStore> {
        let Self(labels, mask) = self;
        let mask = *mask;
        let width = check_width(labels.len())?;
        if width < MASK_WIDTH && mask >> width != 0 {
            return Err(CatGraphError::MalformedDocument(format!(
                "packed mask {mask:#x} sets bits beyond the {width} label pairs"
            )));
        }

        let mut graph = GraphStore::new();
        for label in labels {
            graph.add_vertex(label.as_str());
        }
        for (bit, (u, v)) in pairs(labels).enumerate() {
            if mask & (1 << bit) != 0 {
                graph.add_edge(u, v);
            }
        }
        Ok(graph)
    }

    /// Ordered labels
    pub fn labels(&self) -> &[String] {
        &self.0
    }
}

/// Encode to JSON text
pub fn to_packed_json(graph: &GraphStore, labels: &[String]) -> CatGraphResult<String> {
    Ok(serde_json::to_string(&PackedPoset::encode(graph, labels)?)?)
}

/// Decode JSON text into its labels and graph
pub fn from_packed_json(text: &str) -> CatGraphResult<(Vec<String>, GraphStore)> {
    let packed: PackedPoset = serde_json::from_str(text)
        .map_err(|e| CatGraphError::MalformedDocument(format!("packed poset: {e}")))?;
    let graph = packed.decode()?;
    Ok((packed.0, graph))
}

fn pairs(labels: &[String]) -> impl Iterator<Item = (&str, &str)> {
    labels.iter().enumerate().flat_map(move |(i, u)| {
        labels[i + 1..]
            .iter()
            .map(move |v| (u.as_str(), v.as_str()))
    })
}

fn check_width(count: usize) -> CatGraphResult<usize> {
    let pairs = count * count.saturating_sub(1) / 2;
    if pairs > MASK_WIDTH {
        return Err(CatGraphError::PackedWidthExceeded { pairs });
    }
    Ok(pairs)
}

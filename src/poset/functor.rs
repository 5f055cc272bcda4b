// Copyright 2025 Cowboy AI, LLC.

//! Monotone maps between preorders
//!
//! A functor between two posets is a label map `f` such that every edge
//! `u ≤ v` of the source lands on `f(u) ≤ f(v)` in the target. Functor text
//! is one `src → dest` pair per line.

use indexmap::IndexMap;
use tracing::debug;

use crate::errors::{CatGraphError, CatGraphResult};
use crate::graph::{GraphStore, Reachability};

/// Separator between a label and its image
pub const MAPS_TO: char = '→';

/// A label-to-label map between two posets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Functor {
    mapping: IndexMap<String, String>,
}

impl Functor {
    /// Parse `src → dest` lines; `#` comment lines and blank lines are skipped
    pub fn parse(text: &str) -> CatGraphResult<Self> {
        let mut functor = Functor::default();
        for (n, line) in text.lines().enumerate() {
            if line.starts_with('#') || line.trim().is_empty() {
                continue;
            }
            let Some((src, dest)) = line.split_once(MAPS_TO) else {
                return Err(CatGraphError::parse(n + 1, format!("expected `src {MAPS_TO} dest`")));
            };
            let (src, dest) = (src.trim(), dest.trim());
            if src.is_empty() || dest.is_empty() || dest.contains(MAPS_TO) {
                return Err(CatGraphError::parse(n + 1, format!("expected `src {MAPS_TO} dest`")));
            }
            if let Some(previous) = functor.mapping.get(src) {
                if previous != dest {
                    return Err(CatGraphError::parse(
                        n + 1,
                        format!("{src} already maps to {previous}"),
                    ));
                }
            }
            functor.insert(src, dest);
        }
        Ok(functor)
    }

    /// Map `src` to `dest`, replacing any earlier image
    pub fn insert(&mut self, src: impl Into<String>, dest: impl Into<String>) {
        self.mapping.insert(src.into(), dest.into());
    }

    /// Image of a label
    pub fn image(&self, v: &str) -> Option<&str> {
        self.mapping.get(v).map(String::as_str)
    }

    /// Verify that every source edge is preserved in the target
    ///
    /// Stops at the first offending edge.
    pub fn check(&self, source: &GraphStore, target: &GraphStore) -> CatGraphResult<()> {
        let mut reach = Reachability::new(target);
        for (u, v) in source.edges() {
            let fu = self.require(u)?;
            let fv = self.require(v)?;
            if fu != fv && !reach.is_reachable(fu, fv) {
                return Err(CatGraphError::FunctorViolation {
                    source_edge: (u.to_string(), v.to_string()),
                    image: (fu.to_string(), fv.to_string()),
                });
            }
        }
        debug!(edges = source.edge_count(), "functor preserves order");
        Ok(())
    }

    fn require(&self, v: &str) -> CatGraphResult<&str> {
        self.image(v)
            .ok_or_else(|| CatGraphError::UnmappedVertex(v.to_string()))
    }
}

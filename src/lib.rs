// Copyright 2025 Cowboy AI, LLC.

//! # CIM CatGraph
//!
//! Finite preorders and finite categories of sets for the Composable
//! Information Machine.
//!
//! - **Graphs**: [`GraphStore`] with strongly connected components,
//!   transitive closure and covering reduction
//! - **Posets**: chain text in, Hasse diagram out, as DOT or packed JSON;
//!   order-preserving functor checks
//! - **Categories**: JSON documents validated as categories of finite sets,
//!   with commuting-path checks and a DOT schema view
//! - **Correction**: validators never guess; they ask a [`Corrector`] for a
//!   replacement and re-check, within a bounded [`CorrectionPolicy`]
//!
//! ```
//! use cim_catgraph::poset::{parse_chains, simplify, to_dot};
//!
//! let graph = parse_chains("a ≤ b ≤ c\na ≤ c").unwrap();
//! let simplified = simplify(graph);
//! assert!(!simplified.reduced.has_edge("a", "c"));
//! assert!(to_dot(&simplified.reduced).starts_with("digraph {"));
//! ```

#![warn(missing_docs)]

mod config;
mod corrector;
mod errors;

pub mod category;
pub mod graph;
pub mod poset;

pub use config::{CatGraphConfig, CorrectionPolicy, RenderConfig};
pub use corrector::{CorrectionSession, Corrector, NoCorrector, ScriptedCorrector};
pub use errors::{CatGraphError, CatGraphResult};

pub use category::{
    document_schema, Arrow, Category, CategoryDocument, CategoryObject, CategoryPath, Mapping,
};
pub use graph::{Component, GraphStore, Quotient, Reachability};
pub use poset::{Functor, PackedPoset, Simplified};

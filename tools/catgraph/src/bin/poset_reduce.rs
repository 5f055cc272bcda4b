// Copyright 2025 Cowboy AI, LLC.

//! Simplify a preorder written as `a ≤ b ≤ c` chains
//!
//! ```bash
//! poset_reduce chains.txt --format packed
//! cat chains.txt | poset_reduce > hasse.dot
//! ```

use std::path::PathBuf;

use anyhow::Result;
use catgraph_tools::{init_tracing, read_input, write_output};
use cim_catgraph::poset::{parse_chains, simplify, to_dot, to_packed_json};
use clap::{Parser, ValueEnum};
use tracing::info;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    /// Graphviz digraph of the covering edges
    Dot,
    /// `[labels, mask]` JSON
    Packed,
}

#[derive(Parser, Debug)]
#[command(name = "poset_reduce", version, about = "Contract cycles and keep only covering edges")]
struct Args {
    /// Chain text; stdin when omitted or `-`
    input: Option<PathBuf>,

    /// Output encoding
    #[arg(long, value_enum, default_value_t = Format::Dot)]
    format: Format,

    /// Output file; stdout when omitted
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let graph = parse_chains(&read_input(args.input.as_deref())?)?;
    let simplified = simplify(graph);
    for component in simplified.components.iter().filter(|c| !c.is_trivial()) {
        info!(merged = %component, "isomorphic vertices");
    }

    let text = match args.format {
        Format::Dot => to_dot(&simplified.reduced),
        Format::Packed => to_packed_json(&simplified.reduced, &simplified.order)?,
    };
    write_output(args.out.as_deref(), &text)
}

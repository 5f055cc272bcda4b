// Copyright 2025 Cowboy AI, LLC.

//! Check that a label map between two posets preserves order
//!
//! Prints `OK` on success. A violation names the source edge and its image
//! and exits with status 1.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use catgraph_tools::{init_tracing, read_file};
use cim_catgraph::poset::{parse_chains, Functor};
use cim_catgraph::CatGraphError;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "poset_functor", version, about = "Verify an order-preserving map between posets")]
struct Args {
    /// Chain text of the source poset
    source: PathBuf,
    /// Chain text of the target poset
    target: PathBuf,
    /// `src → dest` lines
    functor: PathBuf,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing();

    let source = parse_chains(&read_file(&args.source)?)?;
    let target = parse_chains(&read_file(&args.target)?)?;
    let functor = Functor::parse(&read_file(&args.functor)?)?;

    match functor.check(&source, &target) {
        Ok(()) => {
            println!("OK");
            Ok(ExitCode::SUCCESS)
        }
        Err(err @ (CatGraphError::FunctorViolation { .. } | CatGraphError::UnmappedVertex(_))) => {
            eprintln!("{err}");
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err.into()),
    }
}

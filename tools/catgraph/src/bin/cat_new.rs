// Copyright 2025 Cowboy AI, LLC.

//! Write an empty category document

use std::path::PathBuf;

use anyhow::{bail, Result};
use catgraph_tools::{init_tracing, write_output};
use cim_catgraph::CategoryDocument;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "cat_new", version, about = "Create an empty category document")]
struct Args {
    /// Document to create; stdout when omitted
    path: Option<PathBuf>,

    /// Replace an existing file
    #[arg(long, default_value_t = false)]
    force: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    if let Some(path) = &args.path {
        if path.exists() && !args.force {
            bail!("{} already exists; pass --force to replace it", path.display());
        }
    }
    write_output(args.path.as_deref(), &CategoryDocument::empty().to_json_pretty()?)
}

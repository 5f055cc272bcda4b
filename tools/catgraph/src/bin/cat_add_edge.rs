// Copyright 2025 Cowboy AI, LLC.

//! Add an arrow to a category document, or extend an existing one
//!
//! ```bash
//! cat_add_edge category.json --id f --source X --target Y --map 1=a --map 2=a
//! ```
//!
//! The document is validated after the edit and rewritten in place unless
//! `--out` is given.

use std::path::PathBuf;

use anyhow::Result;
use catgraph_tools::{corrector, init_tracing, read_file, write_output, CommonArgs};
use cim_catgraph::{Category, Mapping};
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "cat_add_edge", version, about = "Add or extend an arrow of a category")]
struct Args {
    /// Category document
    document: PathBuf,

    /// Arrow id
    #[arg(long)]
    id: String,

    /// Source object
    #[arg(long)]
    source: String,

    /// Target object
    #[arg(long)]
    target: String,

    /// `element=image` entries of the mapping
    #[arg(long = "map", value_parser = parse_entry)]
    entries: Vec<(String, String)>,

    /// JSON array of replacement values handed out on violations
    #[arg(long)]
    corrections: Option<PathBuf>,

    /// Where to write the updated document; defaults to the input
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,
}

fn parse_entry(entry: &str) -> Result<(String, String), String> {
    let (element, image) = entry
        .split_once('=')
        .ok_or_else(|| format!("expected element=image, got {entry:?}"))?;
    Ok((element.trim().to_string(), image.trim().to_string()))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let config = args.common.config()?;
    let mut corrector = corrector(args.corrections.as_deref())?;
    let mut category = Category::from_json(
        &read_file(&args.document)?,
        corrector.as_mut(),
        config.correction,
    )?;

    let mapping: Mapping = args.entries.into_iter().collect();
    category.add_edge(&args.id, &args.source, &args.target, mapping, corrector.as_mut())?;
    info!(arrow = %args.id, "edge added");

    let out = args.out.unwrap_or(args.document);
    write_output(Some(&out), &category.freeze().to_json_pretty()?)
}

// Copyright 2025 Cowboy AI, LLC.

//! Render a category document's schema as DOT, or as SVG through Graphviz

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};
use catgraph_tools::{corrector, init_tracing, read_file, write_output, CommonArgs};
use cim_catgraph::Category;
use clap::Parser;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "cat_dot", version, about = "Draw a category schema")]
struct Args {
    /// Category document
    document: PathBuf,

    /// JSON array of replacement values handed out on violations
    #[arg(long)]
    corrections: Option<PathBuf>,

    /// Pipe through `dot -Tsvg` and write the SVG here
    #[arg(long)]
    svg: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let config = args.common.config()?;
    let mut corrector = corrector(args.corrections.as_deref())?;
    let category = Category::from_json(
        &read_file(&args.document)?,
        corrector.as_mut(),
        config.correction,
    )?;
    let dot = category.dot_schema(&config.render);

    match &args.svg {
        Some(out) => render_svg(&dot, out),
        None => write_output(None, &dot),
    }
}

fn render_svg(dot: &str, out: &Path) -> Result<()> {
    debug!(out = %out.display(), "running dot -Tsvg");
    let mut child = Command::new("dot")
        .args(["-Tsvg", "-o"])
        .arg(out)
        .stdin(Stdio::piped())
        .spawn()
        .context("starting Graphviz `dot`")?;
    child
        .stdin
        .take()
        .context("dot stdin")?
        .write_all(dot.as_bytes())?;
    let status = child.wait()?;
    if !status.success() {
        bail!("dot exited with {status}");
    }
    Ok(())
}

// Copyright 2025 Cowboy AI, LLC.

//! Plumbing shared by the catgraph command-line tools

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cim_catgraph::{CatGraphConfig, Corrector, NoCorrector, ScriptedCorrector};
use clap::Args;
use tracing_subscriber::EnvFilter;

/// Options every tool accepts
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`)
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

impl CommonArgs {
    /// The configuration file, or defaults when none was given
    pub fn config(&self) -> Result<CatGraphConfig> {
        match &self.config {
            Some(path) => CatGraphConfig::load(path)
                .with_context(|| format!("loading config {}", path.display())),
            None => Ok(CatGraphConfig::default()),
        }
    }
}

/// Replies from a JSON array file, or no corrector at all
pub fn corrector(corrections: Option<&Path>) -> Result<Box<dyn Corrector>> {
    match corrections {
        Some(path) => {
            let text = read_file(path)?;
            let scripted = ScriptedCorrector::from_json(&text)
                .with_context(|| format!("parsing corrections {}", path.display()))?;
            Ok(Box::new(scripted))
        }
        None => Ok(Box::new(NoCorrector)),
    }
}

/// Contents of a file, or of stdin when no path (or `-`) is given
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => read_file(p),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("reading stdin")?;
            Ok(text)
        }
    }
}

/// Contents of a file
pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Write to a file, or to stdout when no path is given
pub fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(p) => fs::write(p, text).with_context(|| format!("writing {}", p.display())),
        None => {
            println!("{text}");
            Ok(())
        }
    }
}

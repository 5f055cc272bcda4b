// Copyright 2025 Cowboy AI, LLC.

//! Runtime configuration
//!
//! All settings have defaults, so an empty TOML document is a valid
//! configuration:
//!
//! ```toml
//! [correction]
//! max_attempts = 8
//!
//! [render]
//! palette_scheme = "dark28"
//! palette_size = 8
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CatGraphError, CatGraphResult};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatGraphConfig {
    /// Bounds on the corrector retry loops
    pub correction: CorrectionPolicy,
    /// DOT rendering options
    pub render: RenderConfig,
}

/// Bounded retry policy for validators that call a corrector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorrectionPolicy {
    /// Corrections requested for one value before giving up
    pub max_attempts: usize,
}

impl Default for CorrectionPolicy {
    fn default() -> Self {
        Self { max_attempts: 8 }
    }
}

/// Colour palette used when rendering category schemas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Graphviz colour scheme name
    pub palette_scheme: String,
    /// Number of colours in the scheme
    pub palette_size: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            palette_scheme: "dark28".to_string(),
            palette_size: 8,
        }
    }
}

impl CatGraphConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> CatGraphResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.check()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> CatGraphResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| CatGraphError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    fn check(&self) -> CatGraphResult<()> {
        if self.correction.max_attempts == 0 {
            return Err(CatGraphError::Config(
                "correction.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.render.palette_size == 0 {
            return Err(CatGraphError::Config(
                "render.palette_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

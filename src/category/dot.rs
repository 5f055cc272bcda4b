// Copyright 2025 Cowboy AI, LLC.

//! DOT rendering of a category's schema
//!
//! Objects become boxes and arrows become edges. Arrows taking part in a
//! declared path are coloured, one colour per path, so commuting diagrams
//! stand out when rendered by Graphviz.

use std::collections::{BTreeMap, BTreeSet};

use super::model::{Category, CategoryPath};
use crate::config::RenderConfig;
use crate::poset::escape;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

impl Category {
    /// Render objects, arrows and path colours as a DOT digraph
    pub fn dot_schema(&self, render: &RenderConfig) -> String {
        let mut colors: BTreeMap<&str, BTreeSet<String>> = BTreeMap::new();
        for path in &self.paths {
            let color = path_color(path, render);
            for id in path.chains.iter().flatten() {
                colors.entry(id.as_str()).or_default().insert(color.clone());
            }
        }

        let mut lines = vec!["digraph schema {".to_string()];
        for object in self.objects() {
            lines.push(format!("\"{}\" [shape=box];", escape(&object.label)));
        }
        for arrow in self.arrows() {
            let mut attrs = vec![format!("edgetooltip=\" {} \"", escape(tooltip(&arrow.id)))];
            if let Some(set) = colors.get(arrow.id.as_str()) {
                let joined: Vec<&str> = set.iter().map(String::as_str).collect();
                attrs.push(format!("color=\"{}\"", joined.join(":")));
            }
            lines.push(format!(
                "\"{}\" -> \"{}\" [{}];",
                escape(&arrow.source),
                escape(&arrow.target),
                attrs.join(" ")
            ));
        }
        lines.push("}".to_string());
        lines.join("\n")
    }
}

/// Palette colour for a path, stable across runs
pub fn path_color(path: &CategoryPath, render: &RenderConfig) -> String {
    let index = pair_hash(&path.source, &path.target) % render.palette_size.max(1) + 1;
    format!("/{}/{}", render.palette_scheme, index)
}

/// Arrow ids may carry a description after `:`; the tooltip keeps the name
fn tooltip(id: &str) -> &str {
    id.split(':').next().unwrap_or(id).trim()
}

/// 64-bit FNV-1a over `source`, a unit separator, then `target`
fn pair_hash(source: &str, target: &str) -> u64 {
    source
        .bytes()
        .chain(std::iter::once(0x1f))
        .chain(target.bytes())
        .fold(FNV_OFFSET, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
        })
}

// Copyright 2025 Cowboy AI, LLC.

//! On-disk category documents
//!
//! ```json
//! {
//!   "release": 0,
//!   "compatibility": 0,
//!   "category": {
//!     "graph": {
//!       "vertices": { "X": ["1", "2"], "Y": ["1"] },
//!       "edges":    { "f": { "1": "1", "2": "1" } },
//!       "source":   { "f": "X" },
//!       "target":   { "f": "Y" }
//!     },
//!     "paths": [ { "source": "X", "target": "Y", "edges": [["f"]] } ]
//!   }
//! }
//! ```
//!
//! Loading only checks shape. Facts about the category (totality of arrows,
//! commuting paths) are checked by [`Category`](super::Category).

use std::collections::{BTreeMap, BTreeSet};

use schemars::schema::RootSchema;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::model::CategoryPath;
use crate::errors::{CatGraphError, CatGraphResult};

/// Element labels keyed by element label
pub type Mapping = BTreeMap<String, String>;

/// A versioned category document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryDocument {
    /// Release counter of the data
    #[serde(default)]
    pub release: i64,
    /// Compatibility counter of the format
    #[serde(default, alias = "compat")]
    pub compatibility: i64,
    /// The category itself
    pub category: CategorySpec,
}

/// Graph plus declared paths
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CategorySpec {
    /// Objects and arrows
    pub graph: GraphSpec,
    /// Paths that must commute
    #[serde(default)]
    pub paths: Vec<CategoryPath>,
}

/// Objects, arrows and arrow endpoints as loose maps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GraphSpec {
    /// Object label to its elements; elements must be unique
    #[serde(default)]
    pub vertices: BTreeMap<String, Vec<String>>,
    /// Arrow id to its element mapping
    #[serde(default)]
    pub edges: BTreeMap<String, Mapping>,
    /// Arrow id to source object
    #[serde(default)]
    pub source: BTreeMap<String, String>,
    /// Arrow id to target object
    #[serde(default)]
    pub target: BTreeMap<String, String>,
}

impl CategoryDocument {
    /// A document with no objects, arrows or paths
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse and shape-check JSON text
    pub fn from_json(text: &str) -> CatGraphResult<Self> {
        let document: Self = serde_json::from_str(text)
            .map_err(|e| CatGraphError::MalformedDocument(e.to_string()))?;
        document.check_shape()?;
        Ok(document)
    }

    /// Pretty-printed JSON text
    pub fn to_json_pretty(&self) -> CatGraphResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Structural checks serde cannot express: set-valued arrays hold no
    /// duplicates
    pub fn check_shape(&self) -> CatGraphResult<()> {
        for (label, elements) in &self.category.graph.vertices {
            if let Some(dup) = first_duplicate(elements) {
                return Err(CatGraphError::MalformedDocument(format!(
                    "vertex {label} lists element {dup} twice"
                )));
            }
        }
        if let Some(dup) = first_duplicate(&self.category.paths) {
            return Err(CatGraphError::MalformedDocument(format!(
                "path {} → {} is declared twice",
                dup.source, dup.target
            )));
        }
        for path in &self.category.paths {
            if first_duplicate(&path.chains).is_some() {
                return Err(CatGraphError::MalformedDocument(format!(
                    "path {} → {} repeats a chain",
                    path.source, path.target
                )));
            }
        }
        Ok(())
    }

    /// Element sets keyed by object label
    pub fn vertex_sets(&self) -> BTreeMap<String, BTreeSet<String>> {
        self.category
            .graph
            .vertices
            .iter()
            .map(|(label, elements)| (label.clone(), elements.iter().cloned().collect()))
            .collect()
    }
}

/// JSON Schema describing [`CategoryDocument`]
pub fn document_schema() -> RootSchema {
    schema_for!(CategoryDocument)
}

fn first_duplicate<T: Ord>(items: &[T]) -> Option<&T> {
    let mut seen = BTreeSet::new();
    items.iter().find(|item| !seen.insert(*item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"{
        "release": 3,
        "compat": 1,
        "category": {
            "graph": {
                "vertices": { "X": ["1", "2"], "Y": ["1"] },
                "edges": { "f": { "1": "1", "2": "1" } },
                "source": { "f": "X" },
                "target": { "f": "Y" }
            },
            "paths": [ { "source": "X", "target": "Y", "edges": [["f"]] } ]
        }
    }"#;

    #[test]
    fn sample_document_loads() {
        let doc = CategoryDocument::from_json(SAMPLE).unwrap();
        assert_eq!(doc.release, 3);
        assert_eq!(doc.compatibility, 1);
        assert_eq!(doc.category.paths[0].chains, vec![vec!["f".to_string()]]);
        assert_eq!(doc.vertex_sets()["X"].len(), 2);
    }

    #[test]
    fn document_round_trips_through_json() {
        let doc = CategoryDocument::from_json(SAMPLE).unwrap();
        let again = CategoryDocument::from_json(&doc.to_json_pretty().unwrap()).unwrap();
        assert_eq!(doc, again);
    }

    #[test]
    fn wrong_types_are_malformed() {
        let err = CategoryDocument::from_json(r#"{"category": {"graph": {"vertices": {"X": "1"}}}}"#)
            .unwrap_err();
        assert!(matches!(err, CatGraphError::MalformedDocument(_)));
        assert!(err.is_fatal_input());
    }

    #[test]
    fn duplicate_elements_are_malformed() {
        let err = CategoryDocument::from_json(
            r#"{"category": {"graph": {"vertices": {"X": ["1", "1"]}}}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, CatGraphError::MalformedDocument(_)));
    }

    #[test]
    fn empty_document_has_zero_counters() {
        let text = CategoryDocument::empty().to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["release"], 0);
        assert_eq!(value["compatibility"], 0);
        assert!(value["category"]["graph"]["vertices"]
            .as_object()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn schema_names_the_category_field() {
        let schema = serde_json::to_value(document_schema()).unwrap();
        assert!(schema["properties"]["category"].is_object());
    }
}

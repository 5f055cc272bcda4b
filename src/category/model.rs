// Copyright 2025 Cowboy AI, LLC.

//! Finite categories over labeled element sets
//!
//! Objects carry a finite set of elements. Arrows are total functions from
//! the elements of their source to the elements of their target. Paths
//! declare alternative chains of arrows between two objects; each chain must
//! carry the source elements into the target.

use std::collections::{BTreeMap, BTreeSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::document::{CategoryDocument, CategorySpec, GraphSpec, Mapping};
use super::validate;
use crate::config::CorrectionPolicy;
use crate::corrector::{CorrectionSession, Corrector};
use crate::errors::{CatGraphError, CatGraphResult};

/// An object and its underlying set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryObject {
    /// Object label
    pub label: String,
    /// Element labels
    pub elements: BTreeSet<String>,
}

/// An identified arrow between two objects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arrow {
    /// Arrow id
    pub id: String,
    /// Source object label
    pub source: String,
    /// Target object label
    pub target: String,
    /// Image of each source element
    pub mapping: Mapping,
}

impl Arrow {
    /// Image of an element, if the mapping defines one
    pub fn apply(&self, element: &str) -> Option<&str> {
        self.mapping.get(element).map(String::as_str)
    }
}

/// Alternative arrow chains from one object to another
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub struct CategoryPath {
    /// Object the chains start at
    pub source: String,
    /// Object the chains must land in
    pub target: String,
    /// Each chain is a sequence of arrow ids applied left to right
    #[serde(rename = "edges", default)]
    pub chains: Vec<Vec<String>>,
}

/// A validated finite category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub(crate) release: i64,
    pub(crate) compatibility: i64,
    pub(crate) objects: BTreeMap<String, CategoryObject>,
    pub(crate) arrows: BTreeMap<String, Arrow>,
    pub(crate) paths: Vec<CategoryPath>,
    pub(crate) policy: CorrectionPolicy,
}

impl Category {
    /// Build a category from a document, repairing violations through
    /// `corrector`
    pub fn from_document(
        document: CategoryDocument,
        corrector: &mut dyn Corrector,
        policy: CorrectionPolicy,
    ) -> CatGraphResult<Self> {
        document.check_shape()?;
        let vertices = document.vertex_sets();
        let CategoryDocument {
            release,
            compatibility,
            category: CategorySpec { graph, paths },
        } = document;

        let mut session = CorrectionSession::new(corrector, policy);
        let source = validate::edges_onto(&mut session, "source", &graph.edges, graph.source)?;
        let target = validate::edges_onto(&mut session, "target", &graph.edges, graph.target)?;

        // edges_onto leaves both endpoint maps covering every arrow id
        let arrows = graph
            .edges
            .into_iter()
            .map(|(id, mapping)| {
                let arrow = Arrow {
                    source: source[&id].clone(),
                    target: target[&id].clone(),
                    id: id.clone(),
                    mapping,
                };
                (id, arrow)
            })
            .collect();

        let mut category = Category {
            release,
            compatibility,
            objects: objects_from(vertices),
            arrows,
            paths,
            policy,
        };
        category.validate(&mut session)?;
        info!(
            objects = category.objects.len(),
            arrows = category.arrows.len(),
            paths = category.paths.len(),
            "category validated"
        );
        Ok(category)
    }

    /// Load and validate JSON text
    pub fn from_json(
        text: &str,
        corrector: &mut dyn Corrector,
        policy: CorrectionPolicy,
    ) -> CatGraphResult<Self> {
        Self::from_document(CategoryDocument::from_json(text)?, corrector, policy)
    }

    /// Add an arrow, or merge into an existing one, then revalidate
    ///
    /// Merged mappings let the new entries win. When the given endpoints
    /// disagree with the stored ones the corrector picks which to keep. The
    /// edit is applied to a copy; on error `self` is left as it was.
    pub fn add_edge(
        &mut self,
        id: &str,
        source: &str,
        target: &str,
        mapping: Mapping,
        corrector: &mut dyn Corrector,
    ) -> CatGraphResult<()> {
        let mut session = CorrectionSession::new(corrector, self.policy);
        let mut next = self.clone();
        match next.arrows.get_mut(id) {
            Some(arrow) => {
                arrow.mapping.extend(mapping);
                if arrow.source != source {
                    arrow.source =
                        session.choose(&format!("Source for edge {id}"), &arrow.source, source)?;
                }
                if arrow.target != target {
                    arrow.target =
                        session.choose(&format!("Target for edge {id}"), &arrow.target, target)?;
                }
            }
            None => {
                next.arrows.insert(
                    id.to_string(),
                    Arrow {
                        id: id.to_string(),
                        source: source.to_string(),
                        target: target.to_string(),
                        mapping,
                    },
                );
            }
        }
        next.validate(&mut session)?;
        *self = next;
        Ok(())
    }

    /// Run every validator, repairing through the session
    ///
    /// A corrected path may name an object that does not exist yet, so the
    /// vertex map is checked again after the paths until no label is missing.
    pub(crate) fn validate(&mut self, session: &mut CorrectionSession<'_>) -> CatGraphResult<()> {
        let mut passes = 0;
        loop {
            let vertices =
                validate::vertices(session, &self.arrows, &self.paths, self.vertex_sets())?;
            self.objects = objects_from(vertices);
            validate::arrows(session, &self.objects, &mut self.arrows)?;
            validate::paths(session, &self.objects, &self.arrows, &mut self.paths)?;

            let Some(label) = validate::missing_vertex(&self.objects, &self.arrows, &self.paths)
            else {
                return Ok(());
            };
            passes += 1;
            if passes >= self.policy.max_attempts {
                return Err(CatGraphError::CorrectionExhausted {
                    subject: "vertices".to_string(),
                    complaint: format!("Vertices including {label}"),
                    attempts: passes,
                });
            }
        }
    }

    /// Every current violation, without attempting repair
    pub fn violations(&self) -> Vec<String> {
        validate::violations(&self.objects, &self.arrows, &self.paths)
    }

    /// Arrows with exactly this source and target
    pub fn homset(&self, source: &str, target: &str) -> BTreeSet<&str> {
        self.arrow_ids(|a| a.source == source && a.target == target)
    }

    /// Arrows from an object to itself
    pub fn endoset(&self, vertex: &str) -> BTreeSet<&str> {
        self.homset(vertex, vertex)
    }

    /// Arrows leaving an object
    pub fn edges_from(&self, vertex: &str) -> BTreeSet<&str> {
        self.arrow_ids(|a| a.source == vertex)
    }

    /// Arrows entering an object
    pub fn edges_to(&self, vertex: &str) -> BTreeSet<&str> {
        self.arrow_ids(|a| a.target == vertex)
    }

    /// Image of an object's elements under a chain of arrow ids
    pub fn chain_image(&self, source: &str, chain: &[String]) -> Option<BTreeSet<String>> {
        let start = &self.objects.get(source)?.elements;
        validate::chain_image(&self.arrows, start, chain).ok()
    }

    /// Object by label
    pub fn object(&self, label: &str) -> Option<&CategoryObject> {
        self.objects.get(label)
    }

    /// Arrow by id
    pub fn arrow(&self, id: &str) -> Option<&Arrow> {
        self.arrows.get(id)
    }

    /// All objects, ordered by label
    pub fn objects(&self) -> impl Iterator<Item = &CategoryObject> {
        self.objects.values()
    }

    /// All arrows, ordered by id
    pub fn arrows(&self) -> impl Iterator<Item = &Arrow> {
        self.arrows.values()
    }

    /// Declared paths
    pub fn paths(&self) -> &[CategoryPath] {
        &self.paths
    }

    /// Snapshot as a document
    pub fn freeze(&self) -> CategoryDocument {
        let vertices = self
            .objects
            .values()
            .map(|o| (o.label.clone(), o.elements.iter().cloned().collect()))
            .collect();
        let mut graph = GraphSpec {
            vertices,
            ..GraphSpec::default()
        };
        for arrow in self.arrows.values() {
            graph.edges.insert(arrow.id.clone(), arrow.mapping.clone());
            graph.source.insert(arrow.id.clone(), arrow.source.clone());
            graph.target.insert(arrow.id.clone(), arrow.target.clone());
        }
        CategoryDocument {
            release: self.release,
            compatibility: self.compatibility,
            category: CategorySpec {
                graph,
                paths: self.paths.clone(),
            },
        }
    }

    fn arrow_ids(&self, keep: impl Fn(&Arrow) -> bool) -> BTreeSet<&str> {
        self.arrows
            .values()
            .filter(|a| keep(a))
            .map(|a| a.id.as_str())
            .collect()
    }

    fn vertex_sets(&self) -> BTreeMap<String, BTreeSet<String>> {
        self.objects
            .values()
            .map(|o| (o.label.clone(), o.elements.clone()))
            .collect()
    }
}

fn objects_from(vertices: BTreeMap<String, BTreeSet<String>>) -> BTreeMap<String, CategoryObject> {
    vertices
        .into_iter()
        .map(|(label, elements)| {
            let object = CategoryObject {
                label: label.clone(),
                elements,
            };
            (label, object)
        })
        .collect()
}

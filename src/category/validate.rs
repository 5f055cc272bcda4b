// Copyright 2025 Cowboy AI, LLC.

//! Category validators
//!
//! Each validator pairs a pure complaint function with a repair loop. The
//! complaint function returns `None` for valid data, otherwise the message
//! shown to the corrector.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::document::Mapping;
use super::model::{Arrow, CategoryObject, CategoryPath};
use crate::corrector::CorrectionSession;
use crate::errors::{CatGraphError, CatGraphResult};

type Vertices = BTreeMap<String, BTreeSet<String>>;

/// Make sure every arrow id has an entry in an endpoint map
pub(crate) fn edges_onto(
    session: &mut CorrectionSession<'_>,
    side: &str,
    edges: &BTreeMap<String, Mapping>,
    endpoints: BTreeMap<String, String>,
) -> CatGraphResult<BTreeMap<String, String>> {
    session.repair(&format!("{side} map"), endpoints, |map| {
        edges
            .keys()
            .find(|id| !map.contains_key(*id))
            .map(|id| format!("Edge {id} missing from {side}"))
    })
}

/// Make sure every arrow and path endpoint names an object
pub(crate) fn vertices(
    session: &mut CorrectionSession<'_>,
    arrows: &BTreeMap<String, Arrow>,
    paths: &[CategoryPath],
    vertices: Vertices,
) -> CatGraphResult<Vertices> {
    let referenced = referenced_labels(arrows, paths);
    session.repair("vertices", vertices, |known| {
        referenced
            .iter()
            .find(|label| !known.contains_key(**label))
            .map(|label| format!("Vertices including {label}"))
    })
}

/// Make every arrow total on its source and closed in its target
pub(crate) fn arrows(
    session: &mut CorrectionSession<'_>,
    objects: &BTreeMap<String, CategoryObject>,
    arrows: &mut BTreeMap<String, Arrow>,
) -> CatGraphResult<()> {
    for arrow in arrows.values_mut() {
        let domain = elements(objects, &arrow.source)?;
        let codomain = elements(objects, &arrow.target)?;
        let id = arrow.id.clone();
        arrow.mapping = session.repair(&format!("arrow {id}"), arrow.mapping.clone(), |mapping| {
            arrow_complaint(&id, mapping, domain, codomain)
        })?;
        debug!(arrow = %id, "arrow is total and closed");
    }
    Ok(())
}

/// Make every declared chain land inside its path's target
///
/// A correction replaces the whole path, so every chain is checked again.
pub(crate) fn paths(
    session: &mut CorrectionSession<'_>,
    objects: &BTreeMap<String, CategoryObject>,
    arrows: &BTreeMap<String, Arrow>,
    paths: &mut [CategoryPath],
) -> CatGraphResult<()> {
    for path in paths.iter_mut() {
        let subject = format!("path {} → {}", path.source, path.target);
        *path = session.repair(&subject, path.clone(), |p| path_complaint(objects, arrows, p))?;
        debug!(path = %subject, chains = path.chains.len(), "path commutes");
    }
    Ok(())
}

/// Every complaint the validators would raise, in validation order
pub(crate) fn violations(
    objects: &BTreeMap<String, CategoryObject>,
    arrows: &BTreeMap<String, Arrow>,
    paths: &[CategoryPath],
) -> Vec<String> {
    let mut found: Vec<String> = referenced_labels(arrows, paths)
        .into_iter()
        .filter(|label| !objects.contains_key(*label))
        .map(|label| format!("Vertices including {label}"))
        .collect();

    for arrow in arrows.values() {
        if let (Ok(domain), Ok(codomain)) = (
            elements(objects, &arrow.source),
            elements(objects, &arrow.target),
        ) {
            found.extend(arrow_complaint(&arrow.id, &arrow.mapping, domain, codomain));
        }
    }
    found.extend(paths.iter().filter_map(|p| path_complaint(objects, arrows, p)));
    found
}

/// `None` when `mapping` covers `domain` and maps into `codomain`
pub(crate) fn arrow_complaint(
    id: &str,
    mapping: &Mapping,
    domain: &BTreeSet<String>,
    codomain: &BTreeSet<String>,
) -> Option<String> {
    let missing: Vec<&String> = domain.iter().filter(|x| !mapping.contains_key(*x)).collect();
    if !missing.is_empty() {
        return Some(format!(
            "Arrow {id} needs domain {domain:?}; no image for {missing:?}"
        ));
    }
    let outside: BTreeSet<&String> = mapping.values().filter(|y| !codomain.contains(*y)).collect();
    if !outside.is_empty() {
        return Some(format!(
            "Arrow {id} needs range {codomain:?}; {outside:?} fall outside it"
        ));
    }
    None
}

/// `None` when every chain carries the source elements into the target
///
/// Unknown endpoints are left to the vertex validator.
pub(crate) fn path_complaint(
    objects: &BTreeMap<String, CategoryObject>,
    arrows: &BTreeMap<String, Arrow>,
    path: &CategoryPath,
) -> Option<String> {
    let (Some(source), Some(target)) = (objects.get(&path.source), objects.get(&path.target))
    else {
        return None;
    };
    let (source, target) = (&source.elements, &target.elements);
    for chain in &path.chains {
        match chain_image(arrows, source, chain) {
            Err(reason) => return Some(format!("Path doesn't commute: {reason}")),
            Ok(image) if !image.is_subset(target) => {
                return Some(format!(
                    "Path doesn't commute: chain {chain:?} reaches {image:?}, outside {}",
                    path.target
                ))
            }
            Ok(_) => {}
        }
    }
    None
}

/// Apply a chain of arrows, left to right, to a set of elements
pub(crate) fn chain_image(
    arrows: &BTreeMap<String, Arrow>,
    start: &BTreeSet<String>,
    chain: &[String],
) -> Result<BTreeSet<String>, String> {
    let mut current = start.clone();
    for id in chain {
        let arrow = arrows
            .get(id)
            .ok_or_else(|| format!("unknown arrow {id}"))?;
        current = current
            .iter()
            .map(|x| {
                arrow
                    .apply(x)
                    .map(str::to_string)
                    .ok_or_else(|| format!("arrow {id} has no image for {x}"))
            })
            .collect::<Result<_, _>>()?;
    }
    Ok(current)
}

/// First arrow or path endpoint that names no object
pub(crate) fn missing_vertex<'a>(
    objects: &BTreeMap<String, CategoryObject>,
    arrows: &'a BTreeMap<String, Arrow>,
    paths: &'a [CategoryPath],
) -> Option<&'a str> {
    referenced_labels(arrows, paths)
        .into_iter()
        .find(|label| !objects.contains_key(*label))
}

fn referenced_labels<'a>(
    arrows: &'a BTreeMap<String, Arrow>,
    paths: &'a [CategoryPath],
) -> BTreeSet<&'a str> {
    arrows
        .values()
        .flat_map(|a| [a.source.as_str(), a.target.as_str()])
        .chain(paths.iter().flat_map(|p| [p.source.as_str(), p.target.as_str()]))
        .collect()
}

fn elements<'o>(
    objects: &'o BTreeMap<String, CategoryObject>,
    label: &str,
) -> CatGraphResult<&'o BTreeSet<String>> {
    objects
        .get(label)
        .map(|o| &o.elements)
        .ok_or_else(|| CatGraphError::UnknownVertex(label.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn mapping(pairs: &[(&str, &str)]) -> Mapping {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn chain(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn arrow(id: &str, source: &str, target: &str, pairs: &[(&str, &str)]) -> (String, Arrow) {
        (
            id.to_string(),
            Arrow {
                id: id.to_string(),
                source: source.to_string(),
                target: target.to_string(),
                mapping: mapping(pairs),
            },
        )
    }

    #[test]
    fn arrow_missing_source_element_is_flagged() {
        let complaint = arrow_complaint("f", &mapping(&[("1", "1")]), &set(&["1", "2"]), &set(&["1"]));
        assert!(complaint.unwrap().contains("no image for [\"2\"]"));
    }

    #[test]
    fn arrow_value_outside_target_is_flagged() {
        let complaint = arrow_complaint("f", &mapping(&[("1", "9")]), &set(&["1"]), &set(&["1"]));
        assert!(complaint.unwrap().contains("\"9\""));
    }

    #[test]
    fn extra_keys_beyond_domain_are_allowed() {
        let m = mapping(&[("1", "1"), ("7", "1")]);
        assert_eq!(arrow_complaint("f", &m, &set(&["1"]), &set(&["1"])), None);
    }

    #[test]
    fn chains_compose_left_to_right() {
        let arrows: BTreeMap<String, Arrow> = [
            arrow("f", "A", "B", &[("a", "b1"), ("a2", "b2")]),
            arrow("g", "B", "C", &[("b1", "c"), ("b2", "c")]),
        ]
        .into_iter()
        .collect();
        let image = chain_image(&arrows, &set(&["a", "a2"]), &chain(&["f", "g"])).unwrap();
        assert_eq!(image, set(&["c"]));
        assert!(chain_image(&arrows, &set(&["a"]), &chain(&["g"])).is_err());
        assert!(chain_image(&arrows, &set(&["a"]), &chain(&["h"])).is_err());
    }

    #[test]
    fn path_with_unknown_endpoint_is_left_to_the_vertex_check() {
        let objects: BTreeMap<String, CategoryObject> = [(
            "X".to_string(),
            CategoryObject {
                label: "X".to_string(),
                elements: set(&["1"]),
            },
        )]
        .into_iter()
        .collect();
        let path = CategoryPath {
            source: "X".to_string(),
            target: "W".to_string(),
            chains: vec![vec![]],
        };
        let arrows = BTreeMap::new();
        assert_eq!(path_complaint(&objects, &arrows, &path), None);
        assert_eq!(
            missing_vertex(&objects, &arrows, std::slice::from_ref(&path)),
            Some("W")
        );
    }

    #[test]
    fn empty_chain_is_the_identity() {
        let image = chain_image(&BTreeMap::new(), &set(&["x"]), &[]).unwrap();
        assert_eq!(image, set(&["x"]));
    }
}

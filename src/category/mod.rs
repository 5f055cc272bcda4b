// Copyright 2025 Cowboy AI, LLC.

//! Finite categories of sets, loaded from JSON documents
//!
//! A [`CategoryDocument`] is the stored form. [`Category`] is the validated
//! model built from it: every arrow is total and lands in its target, every
//! declared path commutes, and every referenced object exists. Violations are
//! handed to a [`Corrector`](crate::Corrector) rather than fixed silently.

pub mod document;
pub mod dot;
pub mod model;
mod validate;

pub use document::{document_schema, CategoryDocument, CategorySpec, GraphSpec, Mapping};
pub use dot::path_color;
pub use model::{Arrow, Category, CategoryObject, CategoryPath};

// Copyright 2025 Cowboy AI, LLC.

//! Error types for poset and category operations

use thiserror::Error;

/// Errors that can occur while loading, simplifying or validating graphs
#[derive(Debug, Clone, Error)]
pub enum CatGraphError {
    /// A line of chain or functor text could not be parsed
    #[error("Parse error on line {line}: {reason}")]
    Parse {
        /// One-based line number
        line: usize,
        /// What was wrong with the line
        reason: String,
    },

    /// Input document failed the structural shape checks
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// Packed encoding needs more bits than the mask holds
    #[error("Packed encoding needs {pairs} pair bits but the mask holds 64")]
    PackedWidthExceeded {
        /// Number of unordered label pairs
        pairs: usize,
    },

    /// A label was referenced that the graph does not contain
    #[error("Unknown vertex: {0}")]
    UnknownVertex(String),

    /// A functor has no image for a source vertex
    #[error("Functor does not map vertex: {0}")]
    UnmappedVertex(String),

    /// A functor broke order preservation
    #[error("Functor is not monotone: {} ≤ {} maps to {} ≤ {}, which does not hold", source_edge.0, source_edge.1, image.0, image.1)]
    FunctorViolation {
        /// The source poset edge
        source_edge: (String, String),
        /// Its image in the target poset
        image: (String, String),
    },

    /// The corrector kept returning invalid values
    #[error("Correction of {subject} gave up after {attempts} attempts: {complaint}")]
    CorrectionExhausted {
        /// What was being corrected
        subject: String,
        /// The last complaint
        complaint: String,
        /// Attempts made
        attempts: usize,
    },

    /// The corrector handed back the value it was asked to fix
    #[error("Correction of {subject} stalled on an unchanged value: {complaint}")]
    CorrectionStalled {
        /// What was being corrected
        subject: String,
        /// The complaint that was not addressed
        complaint: String,
    },

    /// No corrector is available to repair the value
    #[error("Corrector unavailable: {0}")]
    CorrectorUnavailable(String),
}

/// Result type for poset and category operations
pub type CatGraphResult<T> = Result<T, CatGraphError>;

impl From<serde_json::Error> for CatGraphError {
    fn from(err: serde_json::Error) -> Self {
        CatGraphError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for CatGraphError {
    fn from(err: toml::de::Error) -> Self {
        CatGraphError::Config(err.to_string())
    }
}

impl CatGraphError {
    /// Create a parse error for a line
    pub fn parse(line: usize, reason: impl Into<String>) -> Self {
        CatGraphError::Parse {
            line,
            reason: reason.into(),
        }
    }

    /// Check if the input itself was unusable and no repair was attempted
    pub fn is_fatal_input(&self) -> bool {
        matches!(
            self,
            CatGraphError::Parse { .. }
                | CatGraphError::MalformedDocument(_)
                | CatGraphError::FunctorViolation { .. }
                | CatGraphError::UnmappedVertex(_)
        )
    }

    /// Check if a repair loop failed to converge
    pub fn is_correction_failure(&self) -> bool {
        matches!(
            self,
            CatGraphError::CorrectionExhausted { .. }
                | CatGraphError::CorrectionStalled { .. }
                | CatGraphError::CorrectorUnavailable(_)
        )
    }
}

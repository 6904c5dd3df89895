//! # Engine Errors
//!
//! Error types for the explanation engine and rule table loading.

use thiserror::Error;

/// Result type for rule table operations
pub type RuleSetResult<T> = Result<T, RuleSetError>;

/// Conditions raised while preparing text for the engine.
///
/// The engine itself is total over normalized text; the only condition is
/// raised by the normalizer and is recovered by the [`Explainer`](super::Explainer).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Text was absent or reduced to nothing after trimming
    #[error("No input text provided")]
    EmptyInput,
}

/// Rule table construction and loading errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleSetError {
    // ==================
    // Loading Errors
    // ==================

    /// Rule file could not be read
    #[error("Failed to read rule file {path}: {message}")]
    Io { path: String, message: String },

    /// Rule file is not valid JSON or has the wrong shape
    #[error("Invalid rule file: {0}")]
    Parse(String),

    /// Rule file declares a version this build does not understand
    #[error("Unsupported rule set version: {0}")]
    UnsupportedVersion(u32),

    // ==================
    // Validation Errors
    // ==================

    /// Rule set has no rules at all
    #[error("Rule set contains no rules")]
    NoRules,

    /// Concept name is blank
    #[error("Rule at position {0} has an empty concept name")]
    EmptyConcept(usize),

    /// Two rules share the same concept name
    #[error("Duplicate concept: {0}")]
    DuplicateConcept(String),

    /// Rule declares no markers
    #[error("Rule '{0}' has no markers")]
    NoMarkers(String),

    /// Rule declares a marker that is empty after trimming
    #[error("Rule '{0}' has an empty marker")]
    EmptyMarker(String),

    /// Rule has an empty explanation
    #[error("Rule '{0}' has an empty explanation")]
    EmptyExplanation(String),

    /// Fallback explanation is empty
    #[error("Fallback explanation must not be empty")]
    EmptyFallback,

    /// Empty-input message is empty
    #[error("Empty-input message must not be empty")]
    EmptyInputMessage,
}

impl RuleSetError {
    /// Stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "ELI5_RULES_IO",
            Self::Parse(_) => "ELI5_RULES_PARSE",
            Self::UnsupportedVersion(_) => "ELI5_RULES_UNSUPPORTED_VERSION",
            _ => "ELI5_RULES_INVALID",
        }
    }
}

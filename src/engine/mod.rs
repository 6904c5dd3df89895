//! # Explanation Engine
//!
//! Turns a short block of lecture text into simplified explanations of the
//! technical concepts it mentions.
//!
//! # Flow
//!
//! raw text → [`normalize`] → [`ExplanationEngine::explain`] → [`compose`]
//!
//! The [`Explainer`] runs the whole flow and recovers empty input locally, so
//! callers always receive a result string.
//!
//! # Rules
//!
//! - The [`RuleSet`] is built once and shared read-only
//! - Matching is case-insensitive substring search
//! - Output order is rule declaration order
//! - No match yields exactly one fallback explanation

mod composer;
mod errors;
mod explainer;
mod normalizer;
mod rules;
mod selector;

pub use composer::{compose, EXPLANATION_SEPARATOR};
pub use errors::{EngineError, RuleSetError, RuleSetResult};
pub use explainer::{Explainer, Explanation, Outcome};
pub use normalizer::{normalize, NormalizedText};
pub use rules::{
    ConceptRule, MatchPolicy, RuleSet, DEFAULT_EMPTY_INPUT, DEFAULT_FALLBACK, RULE_SET_VERSION,
};
pub use selector::{ExplanationEngine, Selection};

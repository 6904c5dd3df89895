//! Explainer facade
//!
//! Runs normalizer, engine and composer for one piece of raw text. Empty
//! input is recovered here by substituting the empty-input message, so the
//! caller always gets a result string.

use std::sync::Arc;

use super::composer::compose;
use super::errors::EngineError;
use super::normalizer::normalize;
use super::rules::RuleSet;
use super::selector::ExplanationEngine;

/// How a result was produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text was absent or blank
    EmptyInput,
    /// Text matched no rule
    Fallback,
    /// One or more concepts matched, in output order
    Matched(Vec<String>),
}

/// A composed result plus how it was reached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    pub result: String,
    pub outcome: Outcome,
}

/// Entry point used by the transport layers
#[derive(Debug, Clone)]
pub struct Explainer {
    engine: ExplanationEngine,
}

impl Explainer {
    /// Create an explainer over a shared rule table
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self {
            engine: ExplanationEngine::new(rules),
        }
    }

    /// Explainer over the built-in rule table
    pub fn builtin() -> Self {
        Self::new(Arc::new(RuleSet::builtin()))
    }

    /// The rule table in use
    pub fn rules(&self) -> &RuleSet {
        self.engine.rules()
    }

    /// Explain raw text and return the composed result
    pub fn explain(&self, raw: Option<&str>) -> String {
        self.explain_detailed(raw).result
    }

    /// Explain raw text and report which path produced the result
    pub fn explain_detailed(&self, raw: Option<&str>) -> Explanation {
        let text = match normalize(raw) {
            Ok(text) => text,
            Err(EngineError::EmptyInput) => {
                return Explanation {
                    result: self.rules().empty_input().to_string(),
                    outcome: Outcome::EmptyInput,
                };
            }
        };

        let selection = self.engine.explain(&text);
        let outcome = if selection.is_fallback() {
            Outcome::Fallback
        } else {
            Outcome::Matched(selection.concepts().iter().map(|c| c.to_string()).collect())
        };

        Explanation {
            result: compose(selection.explanations()),
            outcome,
        }
    }
}

impl Default for Explainer {
    fn default() -> Self {
        Self::builtin()
    }
}

//! Explanation selection
//!
//! Evaluates the rule table against normalized text. Output order is the
//! declaration order of the table, never the order markers appear in the text.

use std::sync::Arc;

use super::normalizer::NormalizedText;
use super::rules::{MatchPolicy, RuleSet};

/// Explanations chosen for one piece of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<'a> {
    concepts: Vec<&'a str>,
    explanations: Vec<&'a str>,
}

impl<'a> Selection<'a> {
    /// Explanations in output order; never empty
    pub fn explanations(&self) -> &[&'a str] {
        &self.explanations
    }

    /// Concepts that fired; empty when the fallback was used
    pub fn concepts(&self) -> &[&'a str] {
        &self.concepts
    }

    /// True if no rule matched
    pub fn is_fallback(&self) -> bool {
        self.concepts.is_empty()
    }
}

/// Pure selection over a shared, immutable rule table
#[derive(Debug, Clone)]
pub struct ExplanationEngine {
    rules: Arc<RuleSet>,
}

impl ExplanationEngine {
    /// Create an engine over a shared rule table
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self { rules }
    }

    /// The rule table in use
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Select explanations for the text.
    ///
    /// Each rule is evaluated once; it fires if any of its markers is a
    /// substring of the text. Under [`MatchPolicy::FirstMatch`] evaluation
    /// stops at the first rule that fires.
    pub fn explain(&self, text: &NormalizedText) -> Selection<'_> {
        let mut concepts = Vec::new();
        let mut explanations = Vec::new();

        for rule in self.rules.rules() {
            if !rule.matches(text) {
                continue;
            }
            concepts.push(rule.concept.as_str());
            explanations.push(rule.explanation.as_str());

            if self.rules.policy() == MatchPolicy::FirstMatch {
                break;
            }
        }

        if explanations.is_empty() {
            explanations.push(self.rules.fallback());
        }

        Selection {
            concepts,
            explanations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::normalizer::normalize;
    use crate::engine::rules::ConceptRule;

    fn engine_with(policy: MatchPolicy) -> ExplanationEngine {
        let rules = RuleSet::new(
            policy,
            vec![
                ConceptRule::new("alpha", ["alpha"], "Alpha explained."),
                ConceptRule::new("beta", ["beta", "b-team"], "Beta explained."),
                ConceptRule::new("gamma", ["gamma"], "Gamma explained."),
            ],
            "Fallback.",
            "Empty.",
        )
        .unwrap();
        ExplanationEngine::new(Arc::new(rules))
    }

    fn explain(engine: &ExplanationEngine, raw: &str) -> Vec<String> {
        let text = normalize(Some(raw)).unwrap();
        engine
            .explain(&text)
            .explanations()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_single_match() {
        let engine = engine_with(MatchPolicy::Accumulate);
        assert_eq!(explain(&engine, "about ALPHA"), vec!["Alpha explained."]);
    }

    #[test]
    fn test_declaration_order_not_text_order() {
        let engine = engine_with(MatchPolicy::Accumulate);
        assert_eq!(
            explain(&engine, "gamma then alpha"),
            vec!["Alpha explained.", "Gamma explained."]
        );
    }

    #[test]
    fn test_rule_contributes_once() {
        let engine = engine_with(MatchPolicy::Accumulate);
        assert_eq!(
            explain(&engine, "beta beta b-team"),
            vec!["Beta explained."]
        );
    }

    #[test]
    fn test_fallback_when_nothing_matches() {
        let engine = engine_with(MatchPolicy::Accumulate);
        let text = normalize(Some("delta")).unwrap();
        let selection = engine.explain(&text);
        assert!(selection.is_fallback());
        assert_eq!(selection.explanations(), &["Fallback."]);
        assert!(selection.concepts().is_empty());
    }

    #[test]
    fn test_first_match_short_circuits() {
        let engine = engine_with(MatchPolicy::FirstMatch);
        let text = normalize(Some("gamma beta")).unwrap();
        let selection = engine.explain(&text);
        assert_eq!(selection.concepts(), &["beta"]);
        assert_eq!(selection.explanations(), &["Beta explained."]);
    }

    #[test]
    fn test_concepts_reported() {
        let engine = engine_with(MatchPolicy::Accumulate);
        let text = normalize(Some("alpha and the b-team")).unwrap();
        let selection = engine.explain(&text);
        assert!(!selection.is_fallback());
        assert_eq!(selection.concepts(), &["alpha", "beta"]);
    }
}

//! Concept rule table
//!
//! A [`RuleSet`] is the single process-wide table of concept rules. It is
//! built once at startup (from the built-in table or a JSON rule file),
//! validated, and then shared read-only behind an `Arc`.
//!
//! Rule file format (version 1):
//!
//! ```json
//! {
//!   "version": 1,
//!   "policy": "accumulate",
//!   "fallback": "...",
//!   "empty_input": "...",
//!   "rules": [
//!     { "concept": "machine-learning", "markers": ["machine learning"], "explanation": "..." }
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{RuleSetError, RuleSetResult};
use super::normalizer::NormalizedText;

/// Only rule file version understood by this build
pub const RULE_SET_VERSION: u32 = 1;

/// Returned when non-empty text matches no rule
pub const DEFAULT_FALLBACK: &str = "This concept is being captured from the lecture. \
ELI5 explanations help students understand complex topics easily.";

/// Returned when the text is absent or blank
pub const DEFAULT_EMPTY_INPUT: &str = "Please enter some lecture content.";

/// Built-in concepts in declaration order: (concept, markers, explanation)
const BUILTIN_RULES: &[(&str, &[&str], &str)] = &[
    (
        "machine-learning",
        &["machine learning"],
        "Machine learning is like teaching a child using examples. \
You show many pictures and correct them when they are wrong. \
Over time, the child learns. Computers learn from examples the same way.",
    ),
    (
        "artificial-intelligence",
        &["artificial intelligence", "ai"],
        "AI (artificial intelligence) is like giving a computer a brain. \
It helps machines think, learn, and make decisions like humans.",
    ),
    (
        "operating-system",
        &["operating system"],
        "An operating system is like a school teacher. \
It makes sure everyone gets a turn and everything runs smoothly inside the computer.",
    ),
    (
        "data-structure",
        &["data structure"],
        "A data structure is like organizing toys in boxes. \
When toys are well organized, you can find them quickly.",
    ),
    (
        "computer-network",
        &["network"],
        "A computer network is like a group of friends passing notes. \
It helps computers share information with each other.",
    ),
];

/// How matching rules are aggregated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Every matching rule contributes its explanation
    #[default]
    Accumulate,
    /// Only the first matching rule (in declaration order) contributes
    FirstMatch,
}

/// A concept with its markers and canned explanation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptRule {
    /// Stable concept identifier (e.g. "machine-learning")
    pub concept: String,
    /// Case-insensitive substring markers; stored lower-cased
    pub markers: Vec<String>,
    /// Explanation returned when any marker is present
    pub explanation: String,
}

impl ConceptRule {
    /// Create a rule; markers are lower-cased
    pub fn new(
        concept: impl Into<String>,
        markers: impl IntoIterator<Item = impl Into<String>>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            concept: concept.into(),
            markers: markers
                .into_iter()
                .map(|m| m.into().to_lowercase())
                .collect(),
            explanation: explanation.into(),
        }
    }

    /// True if any marker occurs in the text
    pub fn matches(&self, text: &NormalizedText) -> bool {
        self.markers.iter().any(|m| text.as_str().contains(m.as_str()))
    }
}

/// On-disk shape of a rule file
#[derive(Debug, Deserialize)]
struct RuleFile {
    version: u32,
    #[serde(default)]
    policy: MatchPolicy,
    #[serde(default = "default_fallback")]
    fallback: String,
    #[serde(default = "default_empty_input")]
    empty_input: String,
    rules: Vec<ConceptRule>,
}

fn default_fallback() -> String {
    DEFAULT_FALLBACK.to_string()
}

fn default_empty_input() -> String {
    DEFAULT_EMPTY_INPUT.to_string()
}

/// Versioned, validated, ordered rule table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSet {
    version: u32,
    policy: MatchPolicy,
    rules: Vec<ConceptRule>,
    fallback: String,
    empty_input: String,
}

impl RuleSet {
    /// Build and validate a rule set
    pub fn new(
        policy: MatchPolicy,
        rules: Vec<ConceptRule>,
        fallback: impl Into<String>,
        empty_input: impl Into<String>,
    ) -> RuleSetResult<Self> {
        let rules = rules
            .into_iter()
            .map(|r| ConceptRule::new(r.concept, r.markers, r.explanation))
            .collect();

        let set = Self {
            version: RULE_SET_VERSION,
            policy,
            rules,
            fallback: fallback.into(),
            empty_input: empty_input.into(),
        };
        set.validate()?;
        Ok(set)
    }

    /// The built-in concept table
    pub fn builtin() -> Self {
        Self {
            version: RULE_SET_VERSION,
            policy: MatchPolicy::Accumulate,
            rules: BUILTIN_RULES
                .iter()
                .map(|(concept, markers, explanation)| {
                    ConceptRule::new(*concept, markers.iter().copied(), *explanation)
                })
                .collect(),
            fallback: DEFAULT_FALLBACK.to_string(),
            empty_input: DEFAULT_EMPTY_INPUT.to_string(),
        }
    }

    /// Parse a rule file from a JSON string
    pub fn from_json_str(json: &str) -> RuleSetResult<Self> {
        let file: RuleFile =
            serde_json::from_str(json).map_err(|e| RuleSetError::Parse(e.to_string()))?;

        if file.version != RULE_SET_VERSION {
            return Err(RuleSetError::UnsupportedVersion(file.version));
        }

        Self::new(file.policy, file.rules, file.fallback, file.empty_input)
    }

    /// Load a rule file from disk
    pub fn load(path: &Path) -> RuleSetResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| RuleSetError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&content)
    }

    fn validate(&self) -> RuleSetResult<()> {
        if self.rules.is_empty() {
            return Err(RuleSetError::NoRules);
        }
        if self.fallback.trim().is_empty() {
            return Err(RuleSetError::EmptyFallback);
        }
        if self.empty_input.trim().is_empty() {
            return Err(RuleSetError::EmptyInputMessage);
        }

        let mut seen = HashSet::new();
        for (position, rule) in self.rules.iter().enumerate() {
            if rule.concept.trim().is_empty() {
                return Err(RuleSetError::EmptyConcept(position));
            }
            if !seen.insert(rule.concept.as_str()) {
                return Err(RuleSetError::DuplicateConcept(rule.concept.clone()));
            }
            if rule.markers.is_empty() {
                return Err(RuleSetError::NoMarkers(rule.concept.clone()));
            }
            if rule.markers.iter().any(|m| m.trim().is_empty()) {
                return Err(RuleSetError::EmptyMarker(rule.concept.clone()));
            }
            if rule.explanation.trim().is_empty() {
                return Err(RuleSetError::EmptyExplanation(rule.concept.clone()));
            }
        }

        Ok(())
    }

    /// Rule file format version
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Aggregation policy
    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Rules in declaration order
    pub fn rules(&self) -> &[ConceptRule] {
        &self.rules
    }

    /// Fallback explanation
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Message for absent or blank input
    pub fn empty_input(&self) -> &str {
        &self.empty_input
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True if there are no rules (never the case for a validated set)
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::normalizer::normalize;

    fn text(s: &str) -> NormalizedText {
        normalize(Some(s)).unwrap()
    }

    #[test]
    fn test_builtin_is_valid() {
        let rules = RuleSet::builtin();
        assert!(rules.validate().is_ok());
        assert_eq!(rules.version(), RULE_SET_VERSION);
        assert_eq!(rules.policy(), MatchPolicy::Accumulate);
        assert_eq!(rules.len(), 5);
    }

    #[test]
    fn test_builtin_declaration_order() {
        let concepts: Vec<_> = RuleSet::builtin()
            .rules()
            .iter()
            .map(|r| r.concept.clone())
            .collect();
        assert_eq!(
            concepts,
            vec![
                "machine-learning",
                "artificial-intelligence",
                "operating-system",
                "data-structure",
                "computer-network",
            ]
        );
    }

    #[test]
    fn test_markers_are_lowercased() {
        let rule = ConceptRule::new("db", ["DataBase"], "A database is a big notebook.");
        assert_eq!(rule.markers, vec!["database"]);
        assert!(rule.matches(&text("What is a DATABASE?")));
    }

    #[test]
    fn test_any_marker_matches() {
        let rule = ConceptRule::new("ai", ["artificial intelligence", "ai"], "x");
        assert!(rule.matches(&text("Artificial Intelligence")));
        assert!(rule.matches(&text("ai")));
        assert!(!rule.matches(&text("quantum")));
    }

    #[test]
    fn test_from_json_defaults() {
        let json = r#"{
            "version": 1,
            "rules": [
                { "concept": "cpu", "markers": ["CPU"], "explanation": "The CPU is the brain." }
            ]
        }"#;
        let rules = RuleSet::from_json_str(json).unwrap();
        assert_eq!(rules.policy(), MatchPolicy::Accumulate);
        assert_eq!(rules.fallback(), DEFAULT_FALLBACK);
        assert_eq!(rules.empty_input(), DEFAULT_EMPTY_INPUT);
        assert_eq!(rules.rules()[0].markers, vec!["cpu"]);
    }

    #[test]
    fn test_from_json_first_match_policy() {
        let json = r#"{
            "version": 1,
            "policy": "first_match",
            "rules": [
                { "concept": "cpu", "markers": ["cpu"], "explanation": "The CPU is the brain." }
            ]
        }"#;
        let rules = RuleSet::from_json_str(json).unwrap();
        assert_eq!(rules.policy(), MatchPolicy::FirstMatch);
    }

    #[test]
    fn test_unsupported_version() {
        let json = r#"{ "version": 2, "rules": [] }"#;
        assert_eq!(
            RuleSet::from_json_str(json),
            Err(RuleSetError::UnsupportedVersion(2))
        );
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            RuleSet::from_json_str("{ not json"),
            Err(RuleSetError::Parse(_))
        ));
    }

    #[test]
    fn test_validation_errors() {
        let ok = |c: &str| ConceptRule::new(c, ["m"], "e");

        assert_eq!(
            RuleSet::new(MatchPolicy::Accumulate, vec![], "f", "e"),
            Err(RuleSetError::NoRules)
        );
        assert_eq!(
            RuleSet::new(MatchPolicy::Accumulate, vec![ok("a")], "  ", "e"),
            Err(RuleSetError::EmptyFallback)
        );
        assert_eq!(
            RuleSet::new(MatchPolicy::Accumulate, vec![ok("a")], "f", ""),
            Err(RuleSetError::EmptyInputMessage)
        );
        assert_eq!(
            RuleSet::new(MatchPolicy::Accumulate, vec![ok("a"), ok("a")], "f", "e"),
            Err(RuleSetError::DuplicateConcept("a".into()))
        );
        assert_eq!(
            RuleSet::new(
                MatchPolicy::Accumulate,
                vec![ConceptRule::new("a", Vec::<String>::new(), "e")],
                "f",
                "e"
            ),
            Err(RuleSetError::NoMarkers("a".into()))
        );
        assert_eq!(
            RuleSet::new(
                MatchPolicy::Accumulate,
                vec![ConceptRule::new("a", [" "], "e")],
                "f",
                "e"
            ),
            Err(RuleSetError::EmptyMarker("a".into()))
        );
        assert_eq!(
            RuleSet::new(
                MatchPolicy::Accumulate,
                vec![ConceptRule::new("a", ["m"], "")],
                "f",
                "e"
            ),
            Err(RuleSetError::EmptyExplanation("a".into()))
        );
        assert_eq!(
            RuleSet::new(
                MatchPolicy::Accumulate,
                vec![ConceptRule::new("", ["m"], "e")],
                "f",
                "e"
            ),
            Err(RuleSetError::EmptyConcept(0))
        );
    }

    #[test]
    fn test_load_missing_file() {
        let err = RuleSet::load(Path::new("/nonexistent/rules.json")).unwrap_err();
        assert_eq!(err.code(), "ELI5_RULES_IO");
    }
}

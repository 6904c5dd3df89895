//! Text normalizer
//!
//! Lower-cases and trims raw input before it reaches the engine.

use std::fmt;

use super::errors::EngineError;

/// Lower-cased, trimmed, non-empty text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedText(String);

impl NormalizedText {
    /// Borrow the normalized text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize raw text.
///
/// Absent, empty, or whitespace-only input yields [`EngineError::EmptyInput`].
pub fn normalize(raw: Option<&str>) -> Result<NormalizedText, EngineError> {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(EngineError::EmptyInput);
    }
    Ok(NormalizedText(trimmed.to_lowercase()))
}

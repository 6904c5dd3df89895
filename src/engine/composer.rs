//! Response composer

/// Blank line between independently matched explanations
pub const EXPLANATION_SEPARATOR: &str = "\n\n";

/// Join explanations into the final response string.
///
/// A single explanation passes through unchanged.
pub fn compose(explanations: &[&str]) -> String {
    explanations.join(EXPLANATION_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_passes_through() {
        assert_eq!(compose(&["Only one."]), "Only one.");
    }

    #[test]
    fn test_blank_line_between() {
        assert_eq!(compose(&["First.", "Second.", "Third."]), "First.\n\nSecond.\n\nThird.");
    }
}

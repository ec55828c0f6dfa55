//! Help-output normalization.
//!
//! `clap` wraps long help lines to the terminal width, which splits phrases
//! such as `(may be supplied multiple times)` across lines. Tests compare
//! against whitespace-collapsed text instead.

/// Collapses every run of whitespace into a single space.
#[must_use]
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns `true` when `haystack` contains `needle` once whitespace is
/// collapsed on both sides.
#[must_use]
pub fn contains_collapsed(haystack: &str, needle: &str) -> bool {
    collapse_whitespace(haystack).contains(&collapse_whitespace(needle))
}

#[cfg(test)]
mod tests {
    use super::{collapse_whitespace, contains_collapsed};

    #[test]
    fn collapses_wrapped_lines() {
        assert_eq!(
            collapse_whitespace("  values (may be\n          supplied multiple times) "),
            "values (may be supplied multiple times)"
        );
    }

    #[test]
    fn matches_across_line_breaks() {
        assert!(contains_collapsed("a helping\n    message", "a helping message"));
        assert!(!contains_collapsed("a helping", "message"));
    }
}

//! Language names as supplied by callers
//!
//! Languages are free-form English names ("English", "Spanish", ...). The only
//! structured value is the auto-detect sentinel.

use std::fmt;

/// Source-language value requesting detection instead of a fixed language
pub const AUTO_DETECT: &str = "auto-detect";

/// Source language of a translation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLanguage {
    /// Detect the language from the text before translating
    AutoDetect,
    /// A concrete language name
    Named(String),
}

impl SourceLanguage {
    /// Parse a caller-supplied value, recognising the sentinel case-insensitively
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if is_auto_detect(value) {
            Self::AutoDetect
        } else {
            Self::Named(value.to_string())
        }
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AutoDetect => f.write_str(AUTO_DETECT),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// Whether `value` is the auto-detect sentinel
#[must_use]
pub fn is_auto_detect(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case(AUTO_DETECT)
}

/// Compare two language names, ignoring surrounding whitespace and case
#[must_use]
pub fn same_language(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn parse_recognises_sentinel_in_any_case() {
        assert_eq!(SourceLanguage::parse("auto-detect"), SourceLanguage::AutoDetect);
        assert_eq!(SourceLanguage::parse("Auto-Detect"), SourceLanguage::AutoDetect);
        assert_eq!(SourceLanguage::parse(" AUTO-DETECT "), SourceLanguage::AutoDetect);
    }

    #[test]
    fn parse_keeps_named_language_verbatim() {
        assert_eq!(
            SourceLanguage::parse("German"),
            SourceLanguage::Named("German".to_string())
        );
    }

    #[test]
    fn display_round_trips_sentinel() {
        assert_eq!(SourceLanguage::AutoDetect.to_string(), AUTO_DETECT);
    }

    #[test]
    fn same_language_ignores_case_and_whitespace() {
        assert!(same_language("English", "english"));
        assert!(same_language("  Spanish", "SPANISH  "));
        assert!(!same_language("English", "Spanish"));
    }

    #[test]
    fn same_language_handles_non_ascii() {
        assert!(same_language("Français", "FRANÇAIS"));
    }

    proptest! {
        #[test]
        fn same_language_is_reflexive_under_padding(
            lang in "[A-Za-z]{1,20}",
            left in " {0,3}",
            right in " {0,3}",
        ) {
            let padded = format!("{left}{}{right}", lang.to_uppercase());
            prop_assert!(same_language(&lang, &padded));
        }
    }
}

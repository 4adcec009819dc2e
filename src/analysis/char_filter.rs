//! Char filters: whole-string transformations applied before tokenization.
//!
//! Normalization runs three of these in order: lowercasing, diacritic
//! stripping, and the non-letter fold. Lowercasing must come first because
//! the fold keeps only lowercase ASCII letters.
//!
//! # Examples
//!
//! ```
//! use resenha::analysis::char_filter::{CharFilter, DiacriticFoldCharFilter};
//!
//! let filter = DiacriticFoldCharFilter::new();
//! assert_eq!(filter.filter("péssimo"), "pessimo");
//! ```

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// A whole-string transformation applied before tokenization.
///
/// Char filters are total: they accept any string, including the empty
/// string, and always produce a value.
pub trait CharFilter: Send + Sync {
    /// Transform the input text.
    fn filter(&self, text: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

/// A char filter that lowercases the entire input.
#[derive(Clone, Debug, Default)]
pub struct LowercaseCharFilter;

impl LowercaseCharFilter {
    /// Create a new lowercase char filter.
    pub fn new() -> Self {
        LowercaseCharFilter
    }
}

impl CharFilter for LowercaseCharFilter {
    fn filter(&self, text: &str) -> String {
        text.to_lowercase()
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

/// A char filter that strips diacritics.
///
/// Each character is canonically decomposed (NFD) into its base character
/// plus combining marks, and the combining marks are dropped. Nothing is
/// recombined, so the output contains only base characters. Applying the
/// filter to already-stripped text is a no-op.
#[derive(Clone, Debug, Default)]
pub struct DiacriticFoldCharFilter;

impl DiacriticFoldCharFilter {
    /// Create a new diacritic-stripping char filter.
    pub fn new() -> Self {
        DiacriticFoldCharFilter
    }
}

impl CharFilter for DiacriticFoldCharFilter {
    fn filter(&self, text: &str) -> String {
        text.nfd().filter(|c| !is_combining_mark(*c)).collect()
    }

    fn name(&self) -> &'static str {
        "diacritic_fold"
    }
}

static NON_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z\s_]").expect("valid non-letter pattern"));

/// A char filter that replaces every character outside `[a-z\s_]` with a
/// single space.
///
/// Runs after lowercasing and diacritic stripping; anything the earlier
/// stages could not reduce to a lowercase ASCII letter becomes token
/// whitespace here.
#[derive(Clone, Debug, Default)]
pub struct NonLetterFoldCharFilter;

impl NonLetterFoldCharFilter {
    /// Create a new non-letter fold char filter.
    pub fn new() -> Self {
        NonLetterFoldCharFilter
    }
}

impl CharFilter for NonLetterFoldCharFilter {
    fn filter(&self, text: &str) -> String {
        NON_LETTER.replace_all(text, " ").into_owned()
    }

    fn name(&self) -> &'static str {
        "non_letter_fold"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_filter() {
        let filter = LowercaseCharFilter::new();
        assert_eq!(filter.filter("Ótimo Produto"), "ótimo produto");
        assert_eq!(filter.filter(""), "");
    }

    #[test]
    fn test_diacritic_fold() {
        let filter = DiacriticFoldCharFilter::new();
        assert_eq!(filter.filter("não é rápido"), "nao e rapido");
        // Composed and decomposed forms fold to the same output.
        assert_eq!(filter.filter("caf\u{00e9}"), "cafe");
        assert_eq!(filter.filter("cafe\u{0301}"), "cafe");
    }

    #[test]
    fn test_diacritic_fold_idempotent() {
        let filter = DiacriticFoldCharFilter::new();
        let once = filter.filter("satisfação");
        assert_eq!(filter.filter(&once), once);
    }

    #[test]
    fn test_non_letter_fold() {
        let filter = NonLetterFoldCharFilter::new();
        assert_eq!(filter.filter("chegou rapido!!"), "chegou rapido  ");
        assert_eq!(filter.filter("preco_base 123"), "preco_base    ");
    }

    #[test]
    fn test_filter_names() {
        assert_eq!(LowercaseCharFilter::new().name(), "lowercase");
        assert_eq!(DiacriticFoldCharFilter::new().name(), "diacritic_fold");
        assert_eq!(NonLetterFoldCharFilter::new().name(), "non_letter_fold");
    }
}

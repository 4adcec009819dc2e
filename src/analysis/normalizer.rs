//! Text normalization pipeline.
//!
//! [`TextNormalizer`] canonicalizes raw review text into the token string
//! every downstream consumer (feature extraction, topic tagging) operates
//! on. It chains char filters, a tokenizer, and token filters in the order:
//!
//! 1. Lowercase the whole string.
//! 2. Strip diacritics (NFD decomposition, combining marks dropped).
//! 3. Replace every character outside `[a-z\s_]` with a space.
//! 4. Split on whitespace and drop stop words.
//! 5. Rejoin the surviving tokens with single spaces.
//!
//! The pipeline is total (any input, including the empty string, produces a
//! value) and idempotent: once non-letters are gone and stop words removed,
//! re-running every stage leaves the string unchanged.
//!
//! # Examples
//!
//! ```
//! use resenha::analysis::normalizer::TextNormalizer;
//!
//! let normalizer = TextNormalizer::with_stop_words(vec!["o", "e"]);
//! let normalized = normalizer.normalize("O produto é Ótimo!");
//! assert_eq!(normalized, "produto otimo");
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use crate::analysis::char_filter::{
    CharFilter, DiacriticFoldCharFilter, LowercaseCharFilter, NonLetterFoldCharFilter,
};
use crate::analysis::token::Token;
use crate::analysis::token_filter::{StopFilter, TokenFilter};
use crate::analysis::tokenizer::{Tokenizer, WhitespaceTokenizer};

/// The text-to-token-string canonicalizer.
///
/// The stopword set is injected at construction; the normalizer holds no
/// other state and is freely shareable across threads.
#[derive(Clone)]
pub struct TextNormalizer {
    char_filters: Vec<Arc<dyn CharFilter>>,
    tokenizer: Arc<dyn Tokenizer>,
    token_filters: Vec<Arc<dyn TokenFilter>>,
}

impl std::fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextNormalizer")
            .field(
                "char_filters",
                &self.char_filters.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "token_filters",
                &self
                    .token_filters
                    .iter()
                    .map(|t| t.name())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl TextNormalizer {
    /// Create a normalizer with the standard review pipeline and the given
    /// stopword set.
    pub fn new(stop_words: HashSet<String>) -> Self {
        TextNormalizer {
            char_filters: vec![
                Arc::new(LowercaseCharFilter::new()),
                Arc::new(DiacriticFoldCharFilter::new()),
                Arc::new(NonLetterFoldCharFilter::new()),
            ],
            tokenizer: Arc::new(WhitespaceTokenizer::new()),
            token_filters: vec![Arc::new(StopFilter::with_stop_words(stop_words))],
        }
    }

    /// Create a normalizer from a list of stop words.
    pub fn with_stop_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(words.into_iter().map(|s| s.into()).collect())
    }

    /// Normalize raw text into its canonical token string.
    ///
    /// May return the empty string, e.g. when every token is a stop word.
    pub fn normalize(&self, text: &str) -> String {
        let tokens = self.tokens(text);
        let mut out = String::new();
        for (i, token) in tokens.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(&token.text);
        }
        out
    }

    /// Run the pipeline and return the surviving tokens.
    pub fn tokens(&self, text: &str) -> Vec<Token> {
        let mut filtered = text.to_string();
        for char_filter in &self.char_filters {
            filtered = char_filter.filter(&filtered);
        }

        let mut tokens = self.tokenizer.tokenize(&filtered);
        for token_filter in &self.token_filters {
            tokens = token_filter.apply(tokens);
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> TextNormalizer {
        TextNormalizer::with_stop_words(vec!["o", "a", "e", "de", "que", "não"])
    }

    #[test]
    fn test_normalize_case_and_punctuation() {
        let n = normalizer();
        assert_eq!(n.normalize("AMEI!!"), n.normalize("amei"));
        assert_eq!(n.normalize("Ótimo produto, chegou rápido!"), "otimo produto chegou rapido");
    }

    #[test]
    fn test_normalize_strips_accents_and_non_letters() {
        let n = normalizer();
        let out = n.normalize("Péssima experiência: 0/10, não recomendo!");
        assert!(out.is_ascii());
        assert!(out.chars().all(|c| c.is_ascii_lowercase() || c == ' ' || c == '_'));
    }

    #[test]
    fn test_normalize_idempotent() {
        let n = normalizer();
        for input in [
            "A entrega atrasou demais e não recebi nenhuma satisfação.",
            "ÓTIMO!!! Recomendo MUITO.",
            "",
            "   ",
            "123 456",
        ] {
            let once = n.normalize(input);
            assert_eq!(n.normalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_all_stop_words_yield_empty() {
        let n = normalizer();
        assert_eq!(n.normalize("o que a de"), "");
    }

    #[test]
    fn test_empty_input() {
        let n = normalizer();
        assert_eq!(n.normalize(""), "");
    }

    #[test]
    fn test_accented_stop_word_survives_folding() {
        // "não" is listed with its accent; the token reaching the stop
        // filter is already folded to "nao", so it survives.
        let n = normalizer();
        assert_eq!(n.normalize("não gostei"), "nao gostei");
    }

    #[test]
    fn test_underscore_is_kept() {
        let n = normalizer();
        assert_eq!(n.normalize("custo_beneficio bom"), "custo_beneficio bom");
    }
}

//! Token filters applied after tokenization.
//!
//! # Examples
//!
//! ```
//! use resenha::analysis::token::Token;
//! use resenha::analysis::token_filter::{StopFilter, TokenFilter};
//!
//! let filter = StopFilter::from_words(vec!["a", "de"]);
//! let tokens = vec![
//!     Token::new("a", 0),
//!     Token::new("entrega", 1),
//!     Token::new("de", 2),
//!     Token::new("hoje", 3),
//! ];
//!
//! let result = filter.apply(tokens);
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[0].text, "entrega");
//! assert_eq!(result[1].text, "hoje");
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use crate::analysis::token::Token;

/// A filter that transforms a token stream.
pub trait TokenFilter: Send + Sync {
    /// Apply the filter to the tokens.
    fn apply(&self, tokens: Vec<Token>) -> Vec<Token>;

    /// Get the name of this filter.
    fn name(&self) -> &'static str;
}

/// A filter that removes stop words from the token stream.
///
/// Stop words are matched by exact equality against the token text, which
/// by the time this filter runs is lowercased and diacritic-stripped.
/// Entries in the stop set that still carry diacritics therefore never
/// match.
#[derive(Clone, Debug)]
pub struct StopFilter {
    stop_words: Arc<HashSet<String>>,
}

impl StopFilter {
    /// Create a stop filter from a set of stop words.
    pub fn with_stop_words(stop_words: HashSet<String>) -> Self {
        StopFilter {
            stop_words: Arc::new(stop_words),
        }
    }

    /// Create a stop filter from a list of stop words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_stop_words(words.into_iter().map(|s| s.into()).collect())
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Check if the stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl TokenFilter for StopFilter {
    fn apply(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens
            .into_iter()
            .filter(|token| !self.is_stop_word(&token.text))
            .collect()
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_filter() {
        let filter = StopFilter::from_words(vec!["o", "e", "que"]);
        let tokens = vec![
            Token::new("o", 0),
            Token::new("produto", 1),
            Token::new("e", 2),
            Token::new("bom", 3),
        ];

        let result = filter.apply(tokens);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].text, "produto");
        assert_eq!(result[1].text, "bom");
    }

    #[test]
    fn test_all_stop_words() {
        let filter = StopFilter::from_words(vec!["o", "que"]);
        let tokens = vec![Token::new("o", 0), Token::new("que", 1)];

        assert!(filter.apply(tokens).is_empty());
    }

    #[test]
    fn test_stop_word_lookup() {
        let filter = StopFilter::from_words(vec!["nao"]);
        assert!(filter.is_stop_word("nao"));
        assert!(!filter.is_stop_word("não"));
        assert_eq!(filter.len(), 1);
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(StopFilter::from_words(vec!["a"]).name(), "stop");
    }
}

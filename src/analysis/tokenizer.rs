//! Tokenizer implementations.

use crate::analysis::token::Token;

/// A tokenizer splits filtered text into tokens.
pub trait Tokenizer: Send + Sync {
    /// Split the text into tokens.
    fn tokenize(&self, text: &str) -> Vec<Token>;

    /// Get the name of this tokenizer.
    fn name(&self) -> &'static str;
}

/// A tokenizer that splits text on whitespace.
///
/// Consecutive whitespace is treated as a single separator, so empty tokens
/// never appear in the output.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        WhitespaceTokenizer
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        text.split_whitespace()
            .enumerate()
            .map(|(position, word)| Token::new(word, position))
            .collect()
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

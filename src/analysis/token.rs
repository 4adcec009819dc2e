//! Token types for text analysis.
//!
//! A [`Token`] is the unit that flows through the normalization pipeline:
//! the tokenizer produces them, token filters consume and rewrite them.
//!
//! # Examples
//!
//! ```
//! use resenha::analysis::token::Token;
//!
//! let token = Token::new("entrega", 0);
//! assert_eq!(token.text, "entrega");
//! assert_eq!(token.position, 0);
//! ```

/// A single unit of text produced by tokenization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The position of the token in the token stream (0-based)
    pub position: usize,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
        }
    }

    /// Replace the text of this token, keeping its position.
    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = text.into();
        self
    }
}

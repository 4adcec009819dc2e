//! Text analysis pipeline: char filters, tokenization, token filters, and
//! the review normalizer built from them.

pub mod char_filter;
pub mod normalizer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use char_filter::{
    CharFilter, DiacriticFoldCharFilter, LowercaseCharFilter, NonLetterFoldCharFilter,
};
pub use normalizer::TextNormalizer;
pub use token::Token;
pub use token_filter::{StopFilter, TokenFilter};
pub use tokenizer::{Tokenizer, WhitespaceTokenizer};

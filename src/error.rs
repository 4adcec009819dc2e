//! Error types for the resenha library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`ResenhaError`] enum. The failure kinds a pipeline caller may want to
//! branch on (missing data, a class-starved corpus, an unobtainable
//! lexicon) are first-class variants rather than message strings.
//!
//! # Examples
//!
//! ```
//! use resenha::error::{ResenhaError, Result};
//!
//! fn load() -> Result<()> {
//!     Err(ResenhaError::data_unavailable("no rows matched the query"))
//! }
//!
//! match load() {
//!     Err(ResenhaError::DataUnavailable(msg)) => assert!(msg.contains("no rows")),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for resenha operations.
#[derive(Error, Debug)]
pub enum ResenhaError {
    /// I/O errors (reading review files, lexicon files, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The review provider failed or returned no usable rows
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    /// A sentiment class is empty, or a split would leave one side without it
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// A stopword or topic lexicon could not be obtained
    #[error("Lexicon unavailable: {0}")]
    LexiconUnavailable(String),

    /// Model fitting or prediction errors
    #[error("Model error: {0}")]
    Model(String),

    /// Invalid operation (programming-contract violations surfaced at API
    /// boundaries)
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Generic anyhow error
    #[error("Error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with [`ResenhaError`].
pub type Result<T> = std::result::Result<T, ResenhaError>;

impl ResenhaError {
    /// Create a new data-unavailable error.
    pub fn data_unavailable<S: Into<String>>(msg: S) -> Self {
        ResenhaError::DataUnavailable(msg.into())
    }

    /// Create a new insufficient-data error.
    pub fn insufficient_data<S: Into<String>>(msg: S) -> Self {
        ResenhaError::InsufficientData(msg.into())
    }

    /// Create a new lexicon-unavailable error.
    pub fn lexicon_unavailable<S: Into<String>>(msg: S) -> Self {
        ResenhaError::LexiconUnavailable(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        ResenhaError::Model(msg.into())
    }

    /// Create a new invalid-operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        ResenhaError::InvalidOperation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = ResenhaError::data_unavailable("query returned nothing");
        assert_eq!(
            error.to_string(),
            "Data unavailable: query returned nothing"
        );

        let error = ResenhaError::insufficient_data("positive class is empty");
        assert_eq!(
            error.to_string(),
            "Insufficient data: positive class is empty"
        );

        let error = ResenhaError::lexicon_unavailable("portuguese stopwords");
        assert_eq!(
            error.to_string(),
            "Lexicon unavailable: portuguese stopwords"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error = ResenhaError::from(io_error);

        match error {
            ResenhaError::Io(_) => {}
            _ => panic!("expected Io variant"),
        }
    }
}

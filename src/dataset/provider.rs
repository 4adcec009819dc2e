//! Review providers and the typed query they answer.
//!
//! The training pipeline issues exactly one query: all rows from a named
//! source, minus excluded scores and excluded literal messages. Providers
//! are free to push the predicates into their backing store; the bundled
//! implementations apply them row by row.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use crate::dataset::ReviewRow;
use crate::error::{ResenhaError, Result};

/// A filter over a named review source.
///
/// # Examples
///
/// ```
/// use resenha::dataset::ReviewQuery;
///
/// let query = ReviewQuery::new("processed_review")
///     .exclude_score(3)
///     .exclude_message("review_comment_message");
/// assert_eq!(query.source(), "processed_review");
/// ```
#[derive(Debug, Clone)]
pub struct ReviewQuery {
    source: String,
    excluded_scores: Vec<f64>,
    excluded_messages: Vec<String>,
}

impl ReviewQuery {
    /// Create a query over the given source with no predicates.
    pub fn new<S: Into<String>>(source: S) -> Self {
        ReviewQuery {
            source: source.into(),
            excluded_scores: Vec::new(),
            excluded_messages: Vec::new(),
        }
    }

    /// Exclude rows whose parsed score equals the given value.
    pub fn exclude_score<V: Into<f64>>(mut self, score: V) -> Self {
        self.excluded_scores.push(score.into());
        self
    }

    /// Exclude rows whose comment equals the given literal (used to skip
    /// header-sentinel rows).
    pub fn exclude_message<S: Into<String>>(mut self, message: S) -> Self {
        self.excluded_messages.push(message.into());
        self
    }

    /// The source name this query targets.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Apply the query predicates to a single row.
    ///
    /// Rows with unparseable scores pass; the labeling stage drops them.
    pub fn accepts(&self, row: &ReviewRow) -> bool {
        if self
            .excluded_messages
            .iter()
            .any(|m| m == &row.review_comment_message)
        {
            return false;
        }
        if let Ok(score) = row.review_score.trim().parse::<f64>() {
            if self.excluded_scores.contains(&score) {
                return false;
            }
        }
        true
    }
}

/// A source of review rows.
pub trait ReviewProvider: Send + Sync {
    /// Fetch every row matching the query.
    fn fetch(&self, query: &ReviewQuery) -> Result<Vec<ReviewRow>>;

    /// Get the name of this provider.
    fn name(&self) -> &'static str;
}

/// In-memory provider for tests and demos.
#[derive(Debug, Clone, Default)]
pub struct StaticReviewProvider {
    rows: Vec<ReviewRow>,
}

impl StaticReviewProvider {
    /// Create a provider over the given rows.
    pub fn new(rows: Vec<ReviewRow>) -> Self {
        StaticReviewProvider { rows }
    }
}

impl ReviewProvider for StaticReviewProvider {
    fn fetch(&self, query: &ReviewQuery) -> Result<Vec<ReviewRow>> {
        Ok(self
            .rows
            .iter()
            .filter(|row| query.accepts(row))
            .cloned()
            .collect())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Provider reading newline-delimited JSON rows from a file.
///
/// Each line holds one object with `review_score` (string or number) and
/// `review_comment_message`. Malformed lines are logged and skipped.
#[derive(Debug, Clone)]
pub struct JsonlReviewProvider {
    path: PathBuf,
}

impl JsonlReviewProvider {
    /// Create a provider reading from the given JSONL file.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        JsonlReviewProvider { path: path.into() }
    }
}

impl ReviewProvider for JsonlReviewProvider {
    fn fetch(&self, query: &ReviewQuery) -> Result<Vec<ReviewRow>> {
        let file = File::open(&self.path).map_err(|e| {
            ResenhaError::data_unavailable(format!(
                "cannot open review file {}: {e}",
                self.path.display()
            ))
        })?;
        let reader = BufReader::new(file);

        let mut rows = Vec::new();
        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<ReviewRow>(&line) {
                Ok(row) => {
                    if query.accepts(&row) {
                        rows.push(row);
                    }
                }
                Err(e) => {
                    log::warn!("skipping malformed row on line {}: {e}", line_num + 1);
                }
            }
        }
        Ok(rows)
    }

    fn name(&self) -> &'static str {
        "jsonl"
    }
}

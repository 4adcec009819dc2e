//! Review rows, sentiment labels, and the dataset transformations that
//! prepare a training corpus: labeling, class balancing, and the stratified
//! split.

pub mod balance;
pub mod provider;
pub mod split;

pub use balance::ClassBalancer;
pub use provider::{JsonlReviewProvider, ReviewProvider, ReviewQuery, StaticReviewProvider};
pub use split::StratifiedSplit;

use serde::{Deserialize, Deserializer, Serialize};

use crate::analysis::TextNormalizer;

/// Binary sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Negative,
    Positive,
}

impl Label {
    /// Derive a label from a review score: above 3 is positive, below 3 is
    /// negative, exactly 3 is discarded.
    pub fn from_score(score: f64) -> Option<Label> {
        if score > 3.0 {
            Some(Label::Positive)
        } else if score < 3.0 {
            Some(Label::Negative)
        } else {
            None
        }
    }

    /// The class index (negative = 0, positive = 1).
    pub fn as_index(&self) -> usize {
        match self {
            Label::Negative => 0,
            Label::Positive => 1,
        }
    }

    /// The class as a regression target.
    pub fn as_f64(&self) -> f64 {
        self.as_index() as f64
    }

    /// Recover a label from a class index.
    pub fn from_index(index: usize) -> Option<Label> {
        match index {
            0 => Some(Label::Negative),
            1 => Some(Label::Positive),
            _ => None,
        }
    }
}

fn score_as_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    // Providers hand the score over as text; tolerate JSON numbers too.
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "review_score must be a string or number, got {other}"
        ))),
    }
}

/// A raw row as returned by a review provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRow {
    /// The review score as text; parsed leniently downstream.
    #[serde(deserialize_with = "score_as_text")]
    pub review_score: String,
    /// The free-text review body.
    pub review_comment_message: String,
}

impl ReviewRow {
    /// Create a row from score text and comment.
    pub fn new<S: Into<String>, T: Into<String>>(score: S, message: T) -> Self {
        ReviewRow {
            review_score: score.into(),
            review_comment_message: message.into(),
        }
    }
}

/// A validated review before labeling.
#[derive(Debug, Clone, PartialEq)]
pub struct RawReview {
    /// Original review text.
    pub text: String,
    /// Numeric score parsed from the row.
    pub score: f64,
}

impl RawReview {
    /// Validate a provider row.
    ///
    /// Rows with blank text or an unparseable score are dropped, not
    /// reported: per-row coercion failures are filtering, never errors.
    pub fn from_row(row: &ReviewRow) -> Option<RawReview> {
        if row.review_comment_message.trim().is_empty() {
            return None;
        }
        let score = row.review_score.trim().parse::<f64>().ok()?;
        Some(RawReview {
            text: row.review_comment_message.clone(),
            score,
        })
    }
}

/// A normalized, labeled training example.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledExample {
    /// Normalized token string (may be empty after stopword removal).
    pub text: String,
    /// Sentiment class.
    pub label: Label,
}

impl LabeledExample {
    /// Label and normalize a validated review. Score-3 reviews yield `None`.
    pub fn from_raw(raw: &RawReview, normalizer: &TextNormalizer) -> Option<LabeledExample> {
        let label = Label::from_score(raw.score)?;
        Some(LabeledExample {
            text: normalizer.normalize(&raw.text),
            label,
        })
    }
}

/// Count examples per class, returned as `(negative, positive)`.
pub fn class_counts(examples: &[LabeledExample]) -> (usize, usize) {
    let negative = examples
        .iter()
        .filter(|e| e.label == Label::Negative)
        .count();
    (negative, examples.len() - negative)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_from_score() {
        assert_eq!(Label::from_score(5.0), Some(Label::Positive));
        assert_eq!(Label::from_score(4.0), Some(Label::Positive));
        assert_eq!(Label::from_score(3.0), None);
        assert_eq!(Label::from_score(2.0), Some(Label::Negative));
        assert_eq!(Label::from_score(1.0), Some(Label::Negative));
    }

    #[test]
    fn test_raw_review_filters_blank_and_unparseable() {
        assert!(RawReview::from_row(&ReviewRow::new("5", "   ")).is_none());
        assert!(RawReview::from_row(&ReviewRow::new("bom", "gostei")).is_none());

        let raw = RawReview::from_row(&ReviewRow::new(" 4 ", "gostei")).unwrap();
        assert_eq!(raw.score, 4.0);
        assert_eq!(raw.text, "gostei");
    }

    #[test]
    fn test_float_score_text_accepted() {
        let raw = RawReview::from_row(&ReviewRow::new("4.0", "gostei")).unwrap();
        assert_eq!(Label::from_score(raw.score), Some(Label::Positive));
    }

    #[test]
    fn test_row_score_deserializes_from_number_or_string() {
        let row: ReviewRow =
            serde_json::from_str(r#"{"review_score": 5, "review_comment_message": "otimo"}"#)
                .unwrap();
        assert_eq!(row.review_score, "5");

        let row: ReviewRow =
            serde_json::from_str(r#"{"review_score": "2", "review_comment_message": "ruim"}"#)
                .unwrap();
        assert_eq!(row.review_score, "2");
    }

    #[test]
    fn test_labeled_example_from_raw() {
        let normalizer = TextNormalizer::with_stop_words(vec!["a", "o"]);
        let raw = RawReview {
            text: "A entrega chegou!".to_string(),
            score: 5.0,
        };
        let example = LabeledExample::from_raw(&raw, &normalizer).unwrap();
        assert_eq!(example.text, "entrega chegou");
        assert_eq!(example.label, Label::Positive);

        let neutral = RawReview {
            text: "ok".to_string(),
            score: 3.0,
        };
        assert!(LabeledExample::from_raw(&neutral, &normalizer).is_none());
    }

    #[test]
    fn test_class_counts() {
        let examples = vec![
            LabeledExample {
                text: "ruim".into(),
                label: Label::Negative,
            },
            LabeledExample {
                text: "otimo".into(),
                label: Label::Positive,
            },
            LabeledExample {
                text: "pessimo".into(),
                label: Label::Negative,
            },
        ];
        assert_eq!(class_counts(&examples), (2, 1));
    }
}

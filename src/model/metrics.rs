//! Evaluation metrics for the sentiment classifier.
//!
//! These are reporting outputs only; nothing here feeds back into fitting.

use serde::{Deserialize, Serialize};

use crate::dataset::Label;

/// 2×2 confusion matrix; "positive" is the positive sentiment class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    /// True negatives
    pub tn: usize,
    /// False positives
    pub fp: usize,
    /// False negatives
    pub fn_: usize,
    /// True positives
    pub tp: usize,
}

impl ConfusionMatrix {
    /// Tally predictions against reference labels.
    pub fn from_labels(y_true: &[Label], y_pred: &[Label]) -> Self {
        let mut matrix = ConfusionMatrix {
            tn: 0,
            fp: 0,
            fn_: 0,
            tp: 0,
        };
        for (&t, &p) in y_true.iter().zip(y_pred.iter()) {
            match (t, p) {
                (Label::Negative, Label::Negative) => matrix.tn += 1,
                (Label::Negative, Label::Positive) => matrix.fp += 1,
                (Label::Positive, Label::Negative) => matrix.fn_ += 1,
                (Label::Positive, Label::Positive) => matrix.tp += 1,
            }
        }
        matrix
    }

    /// Total number of samples.
    pub fn total(&self) -> usize {
        self.tn + self.fp + self.fn_ + self.tp
    }

    /// Fraction of correct predictions.
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.tp + self.tn) as f64 / total as f64
    }
}

impl std::fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Predicted:      Negativo  Positivo")?;
        writeln!(f, "Real Negativo:  {:>8}  {:>8}", self.tn, self.fp)?;
        write!(f, "Real Positivo:  {:>8}  {:>8}", self.fn_, self.tp)
    }
}

/// Precision, recall, F1, and support for one class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

impl ClassMetrics {
    fn compute(tp: usize, fp: usize, fn_: usize) -> Self {
        let precision = if tp + fp == 0 {
            0.0
        } else {
            tp as f64 / (tp + fp) as f64
        };
        let recall = if tp + fn_ == 0 {
            0.0
        } else {
            tp as f64 / (tp + fn_) as f64
        };
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };
        ClassMetrics {
            precision,
            recall,
            f1,
            support: tp + fn_,
        }
    }
}

/// Holdout evaluation of a trained model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub accuracy: f64,
    pub negative: ClassMetrics,
    pub positive: ClassMetrics,
    pub confusion: ConfusionMatrix,
}

impl Evaluation {
    /// Compute all metrics from reference and predicted labels.
    pub fn from_labels(y_true: &[Label], y_pred: &[Label]) -> Self {
        let confusion = ConfusionMatrix::from_labels(y_true, y_pred);
        // The negative row treats "Negativo" as the detected class.
        let negative = ClassMetrics::compute(confusion.tn, confusion.fn_, confusion.fp);
        let positive = ClassMetrics::compute(confusion.tp, confusion.fp, confusion.fn_);
        Evaluation {
            accuracy: confusion.accuracy(),
            negative,
            positive,
            confusion,
        }
    }
}

impl std::fmt::Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Accuracy: {:.2}%", self.accuracy * 100.0)?;
        writeln!(f)?;
        writeln!(
            f,
            "{:<12} {:>10} {:>10} {:>10} {:>10}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        for (name, metrics) in [("Negativo", &self.negative), ("Positivo", &self.positive)] {
            writeln!(
                f,
                "{:<12} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                name, metrics.precision, metrics.recall, metrics.f1, metrics.support
            )?;
        }
        writeln!(f)?;
        write!(f, "{}", self.confusion)
    }
}

//! Stratified train/test split.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::dataset::{Label, LabeledExample};
use crate::error::{ResenhaError, Result};

/// Splits a labeled corpus into train and test partitions, preserving both
/// classes on both sides.
///
/// Each class is shuffled with the configured seed and contributes its own
/// holdout share, so class proportions survive the split. Fails with
/// `InsufficientData` when a class is empty or too small to appear on both
/// sides.
#[derive(Debug, Clone)]
pub struct StratifiedSplit {
    test_fraction: f64,
    seed: u64,
}

impl StratifiedSplit {
    /// Create a split with the given holdout fraction and shuffle seed.
    pub fn new(test_fraction: f64, seed: u64) -> Self {
        StratifiedSplit {
            test_fraction,
            seed,
        }
    }

    /// Split into `(train, test)`.
    pub fn split(
        &self,
        examples: &[LabeledExample],
    ) -> Result<(Vec<LabeledExample>, Vec<LabeledExample>)> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut train = Vec::new();
        let mut test = Vec::new();

        for label in [Label::Negative, Label::Positive] {
            let mut class: Vec<&LabeledExample> =
                examples.iter().filter(|e| e.label == label).collect();
            if class.is_empty() {
                return Err(ResenhaError::insufficient_data(format!(
                    "class {label:?} has no examples"
                )));
            }
            if class.len() < 2 {
                return Err(ResenhaError::insufficient_data(format!(
                    "class {label:?} has a single example and cannot appear in both partitions"
                )));
            }

            class.shuffle(&mut rng);
            let n = class.len();
            let n_test = ((n as f64) * self.test_fraction).round() as usize;
            let n_test = n_test.clamp(1, n - 1);

            test.extend(class[..n_test].iter().map(|e| (*e).clone()));
            train.extend(class[n_test..].iter().map(|e| (*e).clone()));
        }

        Ok((train, test))
    }
}

impl Default for StratifiedSplit {
    fn default() -> Self {
        StratifiedSplit::new(0.2, 42)
    }
}

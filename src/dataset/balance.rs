//! Class balancing by minority oversampling.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::dataset::{Label, LabeledExample, class_counts};

/// Equalizes class sizes by resampling the minority class with replacement.
///
/// Oversampling is preferred over undersampling so no informative example
/// is discarded; the accepted cost is that minority examples repeat. The
/// minority group keeps every original element and gains uniform draws
/// until it matches the majority size, so the output always holds
/// `2 * max(n0, n1)` examples.
///
/// # Examples
///
/// ```
/// use resenha::dataset::{ClassBalancer, Label, LabeledExample, class_counts};
///
/// let examples = vec![
///     LabeledExample { text: "otimo".into(), label: Label::Positive },
///     LabeledExample { text: "bom".into(), label: Label::Positive },
///     LabeledExample { text: "ruim".into(), label: Label::Negative },
/// ];
///
/// let balanced = ClassBalancer::new(42).balance(examples);
/// assert_eq!(class_counts(&balanced), (2, 2));
/// ```
#[derive(Debug, Clone)]
pub struct ClassBalancer {
    seed: u64,
}

impl ClassBalancer {
    /// Create a balancer with the given resampling seed.
    pub fn new(seed: u64) -> Self {
        ClassBalancer { seed }
    }

    /// Balance the two classes, returning positives then negatives.
    pub fn balance(&self, examples: Vec<LabeledExample>) -> Vec<LabeledExample> {
        let (mut negatives, mut positives): (Vec<_>, Vec<_>) = examples
            .into_iter()
            .partition(|e| e.label == Label::Negative);

        let mut rng = StdRng::seed_from_u64(self.seed);
        if negatives.len() < positives.len() {
            Self::oversample(&mut negatives, positives.len(), &mut rng);
        } else if positives.len() < negatives.len() {
            Self::oversample(&mut positives, negatives.len(), &mut rng);
        }

        positives.extend(negatives);
        positives
    }

    fn oversample(group: &mut Vec<LabeledExample>, target: usize, rng: &mut StdRng) {
        let original = group.len();
        if original == 0 {
            return;
        }
        while group.len() < target {
            let pick = rng.random_range(0..original);
            group.push(group[pick].clone());
        }
    }
}

impl Default for ClassBalancer {
    fn default() -> Self {
        ClassBalancer::new(42)
    }
}

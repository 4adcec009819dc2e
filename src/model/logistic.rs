//! Binary logistic regression trained by batch gradient descent.

use crate::error::{ResenhaError, Result};

/// Logistic regression classifier over dense feature vectors.
///
/// Weights start at zero and are updated by full-batch gradient descent on
/// L2-regularized log-loss, so fitting is deterministic for a given input.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    weights: Option<Vec<f64>>,
    intercept: Option<f64>,
    learning_rate: f64,
    max_iter: usize,
    tolerance: f64,
    l2: f64,
}

impl LogisticRegression {
    /// Create a classifier with the given hyperparameters.
    pub fn new(learning_rate: f64, max_iter: usize, tolerance: f64, l2: f64) -> Self {
        LogisticRegression {
            weights: None,
            intercept: None,
            learning_rate,
            max_iter,
            tolerance,
            l2,
        }
    }

    /// Numerically stable sigmoid.
    fn sigmoid(z: f64) -> f64 {
        if z >= 0.0 {
            1.0 / (1.0 + (-z).exp())
        } else {
            let exp_z = z.exp();
            exp_z / (1.0 + exp_z)
        }
    }

    /// Mean binary cross-entropy.
    fn log_loss(y_true: &[f64], y_pred: &[f64]) -> f64 {
        let eps = 1e-15;
        let n = y_true.len() as f64;
        -y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&y, &p)| {
                let p = p.clamp(eps, 1.0 - eps);
                y * p.ln() + (1.0 - y) * (1.0 - p).ln()
            })
            .sum::<f64>()
            / n
    }

    /// Fit the classifier on feature rows `x` and targets `y` in `{0, 1}`.
    pub fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> Result<()> {
        if x.is_empty() {
            return Err(ResenhaError::model("cannot fit on an empty matrix"));
        }
        if x.len() != y.len() {
            return Err(ResenhaError::model(format!(
                "feature rows ({}) and targets ({}) differ in length",
                x.len(),
                y.len()
            )));
        }
        let n_samples = x.len() as f64;
        let n_features = x[0].len();
        if x.iter().any(|row| row.len() != n_features) {
            return Err(ResenhaError::model("feature rows have uneven lengths"));
        }

        let mut weights = vec![0.0; n_features];
        let mut bias = 0.0;
        let mut previous_cost = f64::INFINITY;

        for iter in 0..self.max_iter {
            let predictions: Vec<f64> = x
                .iter()
                .map(|row| Self::sigmoid(Self::dot(row, &weights) + bias))
                .collect();

            let mut gradient = vec![0.0; n_features];
            let mut bias_gradient = 0.0;
            for (row, (&p, &target)) in x.iter().zip(predictions.iter().zip(y.iter())) {
                let error = p - target;
                for (g, &value) in gradient.iter_mut().zip(row.iter()) {
                    *g += error * value;
                }
                bias_gradient += error;
            }
            for (g, &w) in gradient.iter_mut().zip(weights.iter()) {
                *g = *g / n_samples + self.l2 * w;
            }
            bias_gradient /= n_samples;

            for (w, g) in weights.iter_mut().zip(gradient.iter()) {
                *w -= self.learning_rate * g;
            }
            bias -= self.learning_rate * bias_gradient;

            let cost = Self::log_loss(y, &predictions);
            if (previous_cost - cost).abs() < self.tolerance {
                log::debug!("converged at iteration {iter}");
                break;
            }
            previous_cost = cost;
        }

        self.weights = Some(weights);
        self.intercept = Some(bias);
        Ok(())
    }

    /// Predict the positive-class probability for each feature row.
    pub fn predict_proba(&self, x: &[Vec<f64>]) -> Result<Vec<f64>> {
        let weights = self
            .weights
            .as_ref()
            .ok_or_else(|| ResenhaError::model("classifier has not been fitted"))?;
        let bias = self
            .intercept
            .ok_or_else(|| ResenhaError::model("classifier has not been fitted"))?;

        Ok(x.iter()
            .map(|row| Self::sigmoid(Self::dot(row, weights) + bias))
            .collect())
    }

    /// Predict class labels (0 or 1) with a 0.5 threshold.
    pub fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<usize>> {
        Ok(self
            .predict_proba(x)?
            .into_iter()
            .map(|p| usize::from(p >= 0.5))
            .collect())
    }

    fn dot(a: &[f64], b: &[f64]) -> f64 {
        a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
    }
}

impl Default for LogisticRegression {
    fn default() -> Self {
        LogisticRegression::new(0.5, 500, 1e-7, 1e-4)
    }
}

//! Sentiment model: TF-IDF features plus a binary linear classifier.

use serde::{Deserialize, Serialize};

use crate::dataset::Label;
use crate::error::{ResenhaError, Result};
use crate::model::logistic::LogisticRegression;
use crate::model::metrics::Evaluation;
use crate::model::tfidf::TfIdfVectorizer;

/// Hyperparameters for fitting a sentiment model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentModelConfig {
    /// Inclusive word n-gram range for feature extraction.
    pub ngram_range: (usize, usize),
    /// Gradient descent step size.
    pub learning_rate: f64,
    /// Maximum gradient descent iterations.
    pub max_iter: usize,
    /// Convergence tolerance on the log-loss delta.
    pub tolerance: f64,
    /// L2 regularization strength.
    pub l2: f64,
}

impl Default for SentimentModelConfig {
    fn default() -> Self {
        SentimentModelConfig {
            ngram_range: (1, 2),
            learning_rate: 0.5,
            max_iter: 500,
            tolerance: 1e-7,
            l2: 1e-4,
        }
    }
}

/// Trains sentiment classifiers from normalized, labeled text.
///
/// # Examples
///
/// ```
/// use resenha::dataset::Label;
/// use resenha::model::SentimentModel;
///
/// let texts: Vec<String> = vec![
///     "otimo produto recomendo".into(),
///     "entrega rapida perfeita".into(),
///     "pessimo produto quebrado".into(),
///     "entrega atrasou horrivel".into(),
/// ];
/// let labels = vec![
///     Label::Positive,
///     Label::Positive,
///     Label::Negative,
///     Label::Negative,
/// ];
///
/// let model = SentimentModel::default().fit(&texts, &labels).unwrap();
/// let predicted = model.predict_one("produto otimo").unwrap();
/// assert_eq!(predicted, Label::Positive);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SentimentModel {
    config: SentimentModelConfig,
}

impl SentimentModel {
    /// Create a trainer with the given configuration.
    pub fn new(config: SentimentModelConfig) -> Self {
        SentimentModel { config }
    }

    /// Fit on normalized texts and their labels, producing an immutable
    /// [`TrainedModel`].
    ///
    /// Fails with `InsufficientData` when either class is absent.
    pub fn fit(&self, texts: &[String], labels: &[Label]) -> Result<TrainedModel> {
        if texts.len() != labels.len() {
            return Err(ResenhaError::model(format!(
                "texts ({}) and labels ({}) differ in length",
                texts.len(),
                labels.len()
            )));
        }
        let positives = labels.iter().filter(|l| **l == Label::Positive).count();
        if positives == 0 || positives == labels.len() {
            return Err(ResenhaError::insufficient_data(
                "training corpus must hold both positive and negative examples",
            ));
        }

        let mut vectorizer = TfIdfVectorizer::new(self.config.ngram_range)?;
        vectorizer.fit(texts)?;
        let features = vectorizer.transform_batch(texts);
        let targets: Vec<f64> = labels.iter().map(|l| l.as_f64()).collect();

        let mut classifier = LogisticRegression::new(
            self.config.learning_rate,
            self.config.max_iter,
            self.config.tolerance,
            self.config.l2,
        );
        classifier.fit(&features, &targets)?;

        Ok(TrainedModel {
            vectorizer,
            classifier,
        })
    }
}

/// An immutable fitted sentiment model: frozen vocabulary plus classifier
/// weights.
///
/// Safe to share read-only across threads; every method takes `&self`.
#[derive(Debug)]
pub struct TrainedModel {
    vectorizer: TfIdfVectorizer,
    classifier: LogisticRegression,
}

impl TrainedModel {
    /// Predict a label for each normalized text.
    pub fn predict(&self, texts: &[String]) -> Result<Vec<Label>> {
        let features = self.vectorizer.transform_batch(texts);
        self.classifier
            .predict(&features)?
            .into_iter()
            .map(|idx| {
                Label::from_index(idx)
                    .ok_or_else(|| ResenhaError::model(format!("invalid class index {idx}")))
            })
            .collect()
    }

    /// Predict the positive-class probability for each normalized text.
    pub fn predict_proba(&self, texts: &[String]) -> Result<Vec<f64>> {
        let features = self.vectorizer.transform_batch(texts);
        self.classifier.predict_proba(&features)
    }

    /// Predict a label for a single normalized text.
    pub fn predict_one(&self, text: &str) -> Result<Label> {
        let labels = self.predict(std::slice::from_ref(&text.to_string()))?;
        labels
            .into_iter()
            .next()
            .ok_or_else(|| ResenhaError::model("prediction batch came back empty"))
    }

    /// Evaluate on a holdout set.
    pub fn evaluate(&self, texts: &[String], labels: &[Label]) -> Result<Evaluation> {
        let predicted = self.predict(texts)?;
        Ok(Evaluation::from_labels(labels, &predicted))
    }

    /// Size of the frozen vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }
}

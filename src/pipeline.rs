//! End-to-end training orchestration.
//!
//! [`TrainingPipeline::run`] executes the whole sequence (fetch, filter,
//! label, balance, split, fit, evaluate) behind a single failure boundary:
//! the first error of any stage aborts the run, no model is produced, and
//! the caller can branch on the error kind. The only retry anywhere is the
//! lexicon provider's one-shot re-fetch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::TextNormalizer;
use crate::dataset::{
    ClassBalancer, Label, LabeledExample, RawReview, ReviewProvider, ReviewQuery, StratifiedSplit,
    class_counts,
};
use crate::error::{ResenhaError, Result};
use crate::lexicon::{Language, LexiconProvider};
use crate::model::{Evaluation, SentimentModel, SentimentModelConfig, TrainedModel};

/// Score value excluded from training (neutral reviews carry no signal).
pub const NEUTRAL_SCORE: f64 = 3.0;

/// Literal comment marking a header row in exported data.
pub const HEADER_SENTINEL: &str = "review_comment_message";

/// Configuration for a training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Source name the review query targets.
    pub source: String,
    /// Seed for resampling and splitting.
    pub seed: u64,
    /// Holdout fraction for evaluation.
    pub test_fraction: f64,
    /// Stopword language.
    pub language: Language,
    /// Classifier hyperparameters.
    pub model: SentimentModelConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            source: "processed_review".to_string(),
            seed: 42,
            test_fraction: 0.2,
            language: Language::Portuguese,
            model: SentimentModelConfig::default(),
        }
    }
}

/// Outcome of a completed training run.
#[derive(Debug)]
pub struct TrainingReport {
    /// The fitted model.
    pub model: TrainedModel,
    /// Holdout metrics.
    pub evaluation: Evaluation,
    /// Rows returned by the provider, before filtering.
    pub rows_fetched: usize,
    /// `(negative, positive)` counts before balancing.
    pub counts_before: (usize, usize),
    /// `(negative, positive)` counts after balancing.
    pub counts_after: (usize, usize),
    /// Training split size.
    pub train_size: usize,
    /// Holdout split size.
    pub test_size: usize,
    /// When the run finished.
    pub trained_at: DateTime<Utc>,
}

/// Orchestrates one batch training run.
#[derive(Debug, Clone, Default)]
pub struct TrainingPipeline {
    config: PipelineConfig,
}

impl TrainingPipeline {
    /// Create a pipeline with the given configuration.
    pub fn new(config: PipelineConfig) -> Self {
        TrainingPipeline { config }
    }

    /// The pipeline configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full training sequence.
    pub fn run(
        &self,
        provider: &dyn ReviewProvider,
        lexicons: &dyn LexiconProvider,
    ) -> Result<TrainingReport> {
        if !(0.0..1.0).contains(&self.config.test_fraction) || self.config.test_fraction == 0.0 {
            return Err(ResenhaError::invalid_operation(format!(
                "test fraction must be in (0, 1), got {}",
                self.config.test_fraction
            )));
        }

        let stopwords = lexicons.stopwords(self.config.language)?;
        let normalizer = TextNormalizer::new(stopwords);

        let query = ReviewQuery::new(&self.config.source)
            .exclude_score(NEUTRAL_SCORE)
            .exclude_message(HEADER_SENTINEL);
        let rows = provider.fetch(&query).map_err(|e| match e {
            err @ ResenhaError::DataUnavailable(_) => err,
            other => ResenhaError::data_unavailable(format!(
                "review provider {} failed: {other}",
                provider.name()
            )),
        })?;
        log::info!(
            "loaded {} rows from {} via {}",
            rows.len(),
            query.source(),
            provider.name()
        );

        let examples: Vec<LabeledExample> = rows
            .iter()
            .filter_map(RawReview::from_row)
            .filter_map(|raw| LabeledExample::from_raw(&raw, &normalizer))
            .collect();
        if examples.is_empty() {
            return Err(ResenhaError::data_unavailable(
                "no usable rows remain after filtering",
            ));
        }

        let counts_before = class_counts(&examples);
        log::info!(
            "class counts before balancing: Negativo={}, Positivo={}",
            counts_before.0,
            counts_before.1
        );
        if counts_before.0 == 0 || counts_before.1 == 0 {
            return Err(ResenhaError::insufficient_data(format!(
                "one class is empty before balancing (Negativo={}, Positivo={})",
                counts_before.0, counts_before.1
            )));
        }

        let balanced = ClassBalancer::new(self.config.seed).balance(examples);
        let counts_after = class_counts(&balanced);
        log::info!(
            "class counts after balancing: Negativo={}, Positivo={}",
            counts_after.0,
            counts_after.1
        );

        let (train, test) =
            StratifiedSplit::new(self.config.test_fraction, self.config.seed).split(&balanced)?;
        let (train_texts, train_labels) = Self::unzip(&train);
        let (test_texts, test_labels) = Self::unzip(&test);

        let model = SentimentModel::new(self.config.model.clone()).fit(&train_texts, &train_labels)?;
        let evaluation = model.evaluate(&test_texts, &test_labels)?;
        log::info!(
            "holdout accuracy: {:.2}% over {} examples",
            evaluation.accuracy * 100.0,
            test.len()
        );

        Ok(TrainingReport {
            model,
            evaluation,
            rows_fetched: rows.len(),
            counts_before,
            counts_after,
            train_size: train.len(),
            test_size: test.len(),
            trained_at: Utc::now(),
        })
    }

    fn unzip(examples: &[LabeledExample]) -> (Vec<String>, Vec<Label>) {
        let texts = examples.iter().map(|e| e.text.clone()).collect();
        let labels = examples.iter().map(|e| e.label).collect();
        (texts, labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{ReviewRow, StaticReviewProvider};
    use crate::lexicon::BundledLexicon;

    fn sample_rows() -> Vec<ReviewRow> {
        let positives = [
            "Ótimo produto, recomendo muito!",
            "Entrega rápida e produto perfeito.",
            "Excelente qualidade, amei.",
            "Chegou antes do prazo, embalagem perfeita.",
            "Produto muito bom, funciona bem.",
            "Superou as expectativas, incrível.",
            "Material excelente e acabamento impecável.",
            "Muito satisfeito com a compra.",
        ];
        let negatives = [
            "Péssimo produto, chegou quebrado.",
            "A entrega atrasou demais, horrível.",
            "Não recebi nenhuma satisfação.",
            "Produto ruim, não funciona.",
            "Qualidade horrível, dinheiro jogado fora.",
            "Veio com defeito e ninguém responde.",
            "Atrasou e o produto veio errado.",
            "Me arrependo da compra, péssimo.",
        ];

        let mut rows = Vec::new();
        for text in positives {
            rows.push(ReviewRow::new("5", text));
        }
        for text in negatives {
            rows.push(ReviewRow::new("1", text));
        }
        // Filtered out by the query or the labeling stage.
        rows.push(ReviewRow::new("3", "Mediano."));
        rows.push(ReviewRow::new("5", HEADER_SENTINEL));
        rows.push(ReviewRow::new("abc", "Score inválido."));
        rows.push(ReviewRow::new("5", "   "));
        rows
    }

    #[test]
    fn test_full_run() {
        let provider = StaticReviewProvider::new(sample_rows());
        let pipeline = TrainingPipeline::default();

        let report = pipeline.run(&provider, &BundledLexicon::new()).unwrap();

        assert_eq!(report.counts_before, (8, 8));
        assert_eq!(report.counts_after, (8, 8));
        assert_eq!(report.train_size + report.test_size, 16);
        assert!(report.evaluation.accuracy >= 0.5);
        assert!(report.model.vocabulary_size() > 0);
    }

    #[test]
    fn test_run_is_deterministic() {
        let provider = StaticReviewProvider::new(sample_rows());
        let pipeline = TrainingPipeline::default();
        let lexicons = BundledLexicon::new();

        let a = pipeline.run(&provider, &lexicons).unwrap();
        let b = pipeline.run(&provider, &lexicons).unwrap();

        assert_eq!(a.evaluation.accuracy, b.evaluation.accuracy);
        assert_eq!(a.evaluation.confusion, b.evaluation.confusion);
    }

    #[test]
    fn test_empty_source_fails_with_data_unavailable() {
        let provider = StaticReviewProvider::new(Vec::new());
        match TrainingPipeline::default().run(&provider, &BundledLexicon::new()) {
            Err(ResenhaError::DataUnavailable(_)) => {}
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_single_class_fails_with_insufficient_data() {
        let rows = vec![
            ReviewRow::new("5", "Ótimo."),
            ReviewRow::new("4", "Muito bom."),
            ReviewRow::new("5", "Excelente."),
        ];
        let provider = StaticReviewProvider::new(rows);
        match TrainingPipeline::default().run(&provider, &BundledLexicon::new()) {
            Err(ResenhaError::InsufficientData(_)) => {}
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_fraction_is_rejected() {
        let config = PipelineConfig {
            test_fraction: 1.5,
            ..PipelineConfig::default()
        };
        let provider = StaticReviewProvider::new(sample_rows());
        match TrainingPipeline::new(config).run(&provider, &BundledLexicon::new()) {
            Err(ResenhaError::InvalidOperation(_)) => {}
            other => panic!("unexpected: {other:?}"),
        }
    }
}

//! Single-review analysis: sentiment, topics, and confidence for one raw
//! text.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::analysis::TextNormalizer;
use crate::dataset::Label;
use crate::error::Result;
use crate::model::TrainedModel;
use crate::topics::TopicTagger;

/// Human-readable sentiment polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    #[serde(rename = "Negativo")]
    Negative,
    #[serde(rename = "Positivo")]
    Positive,
}

impl Sentiment {
    /// The report label for this polarity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Negative => "Negativo",
            Sentiment::Positive => "Positivo",
        }
    }
}

impl From<Label> for Sentiment {
    fn from(label: Label) -> Self {
        match label {
            Label::Negative => Sentiment::Negative,
            Label::Positive => Sentiment::Positive,
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The structured signal extracted from one review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Predicted polarity.
    pub sentiment: Sentiment,
    /// Matched topics; `{"GERAL"}` when nothing matched. Never empty.
    pub topics: BTreeSet<String>,
    /// The canonical token string the model actually saw.
    pub normalized_text: String,
    /// The model's probability for the class it predicted, in `[0, 1]`.
    pub confidence: f64,
}

/// Turns one raw review string into an [`AnalysisResult`].
///
/// Holds the normalizer and topic tagger; the trained model is passed per
/// call so one analyzer can serve any number of models. Analysis has no
/// side effects, so a shared analyzer and model may be used concurrently.
#[derive(Clone, Debug)]
pub struct ReviewAnalyzer {
    normalizer: TextNormalizer,
    tagger: TopicTagger,
}

impl ReviewAnalyzer {
    /// Create an analyzer from a normalizer and a topic tagger.
    pub fn new(normalizer: TextNormalizer, tagger: TopicTagger) -> Self {
        ReviewAnalyzer { normalizer, tagger }
    }

    /// Analyze a raw review with the given trained model.
    ///
    /// The text is normalized exactly once and the same canonical form
    /// feeds both the topic tagger and the classifier. Confidence is the
    /// probability of the class the model predicted: the positive-class
    /// probability for "Positivo", its complement for "Negativo".
    pub fn analyze(&self, raw_text: &str, model: &TrainedModel) -> Result<AnalysisResult> {
        let normalized_text = self.normalizer.normalize(raw_text);
        let topics = self.tagger.tag(&normalized_text);

        let batch = [normalized_text.clone()];
        let label = model.predict(&batch)?[0];
        let positive_proba = model.predict_proba(&batch)?[0];
        let confidence = match label {
            Label::Positive => positive_proba,
            Label::Negative => 1.0 - positive_proba,
        };

        Ok(AnalysisResult {
            sentiment: label.into(),
            topics,
            normalized_text,
            confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{BundledLexicon, Language, LexiconProvider};
    use crate::model::SentimentModel;

    fn analyzer() -> ReviewAnalyzer {
        let stopwords = BundledLexicon::new()
            .stopwords(Language::Portuguese)
            .unwrap();
        ReviewAnalyzer::new(
            TextNormalizer::new(stopwords),
            TopicTagger::with_default_lexicon(),
        )
    }

    fn trained_model() -> TrainedModel {
        let texts: Vec<String> = [
            "otimo produto recomendo muito",
            "entrega rapida produto perfeito",
            "excelente qualidade amei",
            "chegou antes prazo embalagem perfeita",
            "pessimo produto quebrado",
            "entrega atrasou demais horrivel",
            "nao recebi nenhuma satisfacao",
            "produto ruim nao funciona",
        ]
        .iter()
        .map(|t| t.to_string())
        .collect();
        let labels = vec![
            Label::Positive,
            Label::Positive,
            Label::Positive,
            Label::Positive,
            Label::Negative,
            Label::Negative,
            Label::Negative,
            Label::Negative,
        ];
        SentimentModel::default().fit(&texts, &labels).unwrap()
    }

    #[test]
    fn test_sentiment_rendering() {
        assert_eq!(Sentiment::Negative.to_string(), "Negativo");
        assert_eq!(Sentiment::Positive.as_str(), "Positivo");
    }

    #[test]
    fn test_negative_delivery_review() {
        let result = analyzer()
            .analyze(
                "A entrega atrasou demais e não recebi nenhuma satisfação.",
                &trained_model(),
            )
            .unwrap();

        assert_eq!(result.sentiment, Sentiment::Negative);
        assert!(result.topics.contains("ENTREGA"));
        assert!(result.confidence >= 0.5);
        assert!(result.confidence <= 1.0);
    }

    #[test]
    fn test_confidence_is_own_class_probability() {
        let model = trained_model();
        let analyzer = analyzer();

        for text in ["Produto excelente, amei!", "Péssimo, quebrou logo."] {
            let result = analyzer.analyze(text, &model).unwrap();
            let normalized = [result.normalized_text.clone()];
            let positive_proba = model.predict_proba(&normalized).unwrap()[0];
            let expected = match result.sentiment {
                Sentiment::Positive => positive_proba,
                Sentiment::Negative => 1.0 - positive_proba,
            };
            assert!((result.confidence - expected).abs() < 1e-12);
            assert!(result.confidence >= 0.5);
        }
    }

    #[test]
    fn test_empty_review_is_defined() {
        let result = analyzer().analyze("", &trained_model()).unwrap();

        assert_eq!(result.normalized_text, "");
        assert_eq!(result.topics.len(), 1);
        assert!(result.topics.contains("GERAL"));
        assert!((0.0..=1.0).contains(&result.confidence));
    }

    #[test]
    fn test_normalized_text_round_trips() {
        let analyzer = analyzer();
        let result = analyzer
            .analyze("Ótimo produto, chegou rápido!", &trained_model())
            .unwrap();
        assert_eq!(
            analyzer.normalizer.normalize(&result.normalized_text),
            result.normalized_text
        );
    }
}

//! Sentiment modeling: lexical feature extraction, the linear classifier,
//! and evaluation metrics.

pub mod logistic;
pub mod metrics;
pub mod sentiment;
pub mod tfidf;

pub use logistic::LogisticRegression;
pub use metrics::{ClassMetrics, ConfusionMatrix, Evaluation};
pub use sentiment::{SentimentModel, SentimentModelConfig, TrainedModel};
pub use tfidf::TfIdfVectorizer;

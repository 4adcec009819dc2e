//! Command line argument parsing for the resenha CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::lexicon::Language;

/// resenha - sentiment and topic analysis for customer reviews
#[derive(Parser, Debug, Clone)]
#[command(name = "resenha")]
#[command(about = "Sentiment classification and topic tagging for customer reviews")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct ResenhaArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl ResenhaArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Output format for command results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Human,
    /// JSON
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train a sentiment model and report holdout metrics
    Train(TrainArgs),

    /// Train a fresh model, then analyze review texts with it
    Analyze(AnalyzeArgs),
}

/// Arguments shared by every command that trains a model
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Review corpus file (JSONL, one {review_score, review_comment_message}
    /// object per line)
    #[arg(short, long, value_name = "REVIEWS_FILE")]
    pub data: PathBuf,

    /// Source name recorded in the review query
    #[arg(long, default_value = "processed_review")]
    pub source: String,

    /// Seed for resampling and the train/test split
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Holdout fraction used for evaluation
    #[arg(long, default_value = "0.2")]
    pub test_fraction: f64,

    /// Stopword language
    #[arg(long, default_value = "portuguese")]
    pub language: Language,

    /// Stopword file (JSON map of language to word list) overriding the
    /// bundled lists
    #[arg(long, value_name = "STOPWORDS_FILE")]
    pub stopwords: Option<PathBuf>,
}

/// Arguments for analyzing reviews
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub train: TrainArgs,

    /// Topic lexicon file (JSON map of topic to keyword list) overriding
    /// the built-in lexicon
    #[arg(long, value_name = "TOPICS_FILE")]
    pub topics: Option<PathBuf>,

    /// Match topic keywords only at token boundaries instead of by
    /// substring containment
    #[arg(long)]
    pub token_boundary: bool,

    /// Review texts to analyze (defaults to a built-in sample set)
    #[arg(value_name = "TEXT")]
    pub texts: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_train_command() {
        let args = ResenhaArgs::parse_from([
            "resenha",
            "train",
            "--data",
            "reviews.jsonl",
            "--seed",
            "7",
        ]);
        match args.command {
            Command::Train(train) => {
                assert_eq!(train.data, PathBuf::from("reviews.jsonl"));
                assert_eq!(train.seed, 7);
                assert_eq!(train.test_fraction, 0.2);
                assert_eq!(train.language, Language::Portuguese);
            }
            _ => panic!("expected train command"),
        }
    }

    #[test]
    fn test_parse_analyze_with_texts() {
        let args = ResenhaArgs::parse_from([
            "resenha",
            "-f",
            "json",
            "analyze",
            "--data",
            "reviews.jsonl",
            "--token-boundary",
            "Produto ótimo!",
        ]);
        assert_eq!(args.output_format, OutputFormat::Json);
        match args.command {
            Command::Analyze(analyze) => {
                assert!(analyze.token_boundary);
                assert_eq!(analyze.texts, vec!["Produto ótimo!".to_string()]);
            }
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn test_verbosity() {
        let args = ResenhaArgs::parse_from(["resenha", "-vv", "train", "--data", "r.jsonl"]);
        assert_eq!(args.verbosity(), 2);

        let args = ResenhaArgs::parse_from(["resenha", "-q", "train", "--data", "r.jsonl"]);
        assert_eq!(args.verbosity(), 0);
    }
}

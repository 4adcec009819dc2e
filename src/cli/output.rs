//! Output formatting for CLI commands.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::args::{OutputFormat, ResenhaArgs};
use crate::error::Result;
use crate::model::Evaluation;
use crate::pipeline::TrainingReport;
use crate::review::AnalysisResult;

/// Result structure for a training run.
#[derive(Debug, Serialize)]
pub struct TrainSummary {
    pub rows_fetched: usize,
    pub negative_before: usize,
    pub positive_before: usize,
    pub negative_after: usize,
    pub positive_after: usize,
    pub train_size: usize,
    pub test_size: usize,
    pub evaluation: Evaluation,
    pub trained_at: DateTime<Utc>,
}

impl From<&TrainingReport> for TrainSummary {
    fn from(report: &TrainingReport) -> Self {
        TrainSummary {
            rows_fetched: report.rows_fetched,
            negative_before: report.counts_before.0,
            positive_before: report.counts_before.1,
            negative_after: report.counts_after.0,
            positive_after: report.counts_after.1,
            train_size: report.train_size,
            test_size: report.test_size,
            evaluation: report.evaluation.clone(),
            trained_at: report.trained_at,
        }
    }
}

/// Result structure for one analyzed review.
#[derive(Debug, Serialize)]
pub struct AnalysisOutput {
    pub original: String,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

/// Print either the human rendering or the JSON serialization of a result,
/// depending on the requested format.
pub fn output_result<T: Serialize>(human: &str, data: &T, cli_args: &ResenhaArgs) -> Result<()> {
    match cli_args.output_format {
        OutputFormat::Human => println!("{human}"),
        OutputFormat::Json => {
            let rendered = if cli_args.pretty {
                serde_json::to_string_pretty(data)?
            } else {
                serde_json::to_string(data)?
            };
            println!("{rendered}");
        }
    }
    Ok(())
}

/// Render a training report for human consumption.
pub fn render_train_report(report: &TrainingReport) -> String {
    format!(
        "Loaded {} rows.\n\n\
         Class counts before balancing:\n  Negativo: {}\n  Positivo: {}\n\n\
         Class counts after balancing:\n  Negativo: {}\n  Positivo: {}\n\n\
         Train/test split: {} / {}\n\n{}",
        report.rows_fetched,
        report.counts_before.0,
        report.counts_before.1,
        report.counts_after.0,
        report.counts_after.1,
        report.train_size,
        report.test_size,
        report.evaluation
    )
}

/// Render one analyzed review for human consumption.
pub fn render_analysis(output: &AnalysisOutput) -> String {
    let topics: Vec<&str> = output.result.topics.iter().map(|t| t.as_str()).collect();
    format!(
        "{}\nOriginal: {}\nConfiança: {:.2}%\nClassificação: {}\nTópicos: {}",
        "-".repeat(50),
        output.original,
        output.result.confidence * 100.0,
        output.result.sentiment,
        topics.join(", ")
    )
}

//! Command implementations for the resenha CLI.

use crate::analysis::TextNormalizer;
use crate::cli::args::{AnalyzeArgs, Command, OutputFormat, ResenhaArgs, TrainArgs};
use crate::cli::output::{
    AnalysisOutput, TrainSummary, output_result, render_analysis, render_train_report,
};
use crate::dataset::JsonlReviewProvider;
use crate::error::Result;
use crate::lexicon::{
    BundledLexicon, FileLexiconProvider, LexiconProvider, RetryingLexiconProvider,
};
use crate::pipeline::{PipelineConfig, TrainingPipeline, TrainingReport};
use crate::review::ReviewAnalyzer;
use crate::topics::{MatchMode, TopicLexicon, TopicTagger};

/// Reviews analyzed when the `analyze` command receives no texts.
const DEFAULT_SAMPLE_REVIEWS: &[&str] = &[
    "Simplesmente incrível! Superou todas as minhas expectativas.",
    "Material de excelente qualidade e acabamento impecável.",
    "Chegou muito antes do prazo e perfeitamente embalado. Recomendo!",
    "A entrega atrasou demais e não recebi nenhuma satisfação.",
    "Produto de péssima qualidade, quebrou no primeiro dia de uso.",
    "Infelizmente, o item não funciona como deveria.",
    "A cor do produto veio totalmente diferente da foto no site.",
    "O design é muito bonito, porém o material parece frágil.",
    "Gostei do produto, mas a embalagem veio danificada.",
    "A montagem foi um pouco difícil, mas o resultado final ficou bom.",
];

/// Execute a CLI command.
pub fn execute_command(args: ResenhaArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => train(train_args.clone(), &args),
        Command::Analyze(analyze_args) => analyze(analyze_args.clone(), &args),
    }
}

fn pipeline_config(args: &TrainArgs) -> PipelineConfig {
    PipelineConfig {
        source: args.source.clone(),
        seed: args.seed,
        test_fraction: args.test_fraction,
        language: args.language,
        ..PipelineConfig::default()
    }
}

fn lexicon_provider(args: &TrainArgs) -> Box<dyn LexiconProvider> {
    match &args.stopwords {
        Some(path) => Box::new(RetryingLexiconProvider::new(FileLexiconProvider::new(
            path.clone(),
        ))),
        None => Box::new(BundledLexicon::new()),
    }
}

fn run_training(args: &TrainArgs, cli_args: &ResenhaArgs) -> Result<TrainingReport> {
    if cli_args.verbosity() > 1 {
        println!("Training from: {}", args.data.display());
    }
    let provider = JsonlReviewProvider::new(&args.data);
    let lexicons = lexicon_provider(args);
    TrainingPipeline::new(pipeline_config(args)).run(&provider, lexicons.as_ref())
}

/// Train a model and print the evaluation report.
fn train(args: TrainArgs, cli_args: &ResenhaArgs) -> Result<()> {
    let report = run_training(&args, cli_args)?;
    output_result(
        &render_train_report(&report),
        &TrainSummary::from(&report),
        cli_args,
    )
}

/// Train a fresh model, then analyze the given (or sample) reviews.
fn analyze(args: AnalyzeArgs, cli_args: &ResenhaArgs) -> Result<()> {
    let report = run_training(&args.train, cli_args)?;
    if cli_args.verbosity() > 0 && cli_args.output_format == OutputFormat::Human {
        println!("{}\n", render_train_report(&report));
    }

    let stopwords = lexicon_provider(&args.train).stopwords(args.train.language)?;
    let lexicon = match &args.topics {
        Some(path) => TopicLexicon::from_json_file(path)?,
        None => TopicLexicon::default_reviews(),
    };
    let mode = if args.token_boundary {
        MatchMode::TokenBoundary
    } else {
        MatchMode::Substring
    };
    let analyzer = ReviewAnalyzer::new(
        TextNormalizer::new(stopwords),
        TopicTagger::new(lexicon).with_mode(mode),
    );

    let texts: Vec<String> = if args.texts.is_empty() {
        DEFAULT_SAMPLE_REVIEWS
            .iter()
            .map(|t| t.to_string())
            .collect()
    } else {
        args.texts.clone()
    };

    let mut outputs = Vec::with_capacity(texts.len());
    for text in &texts {
        let result = analyzer.analyze(text, &report.model)?;
        outputs.push(AnalysisOutput {
            original: text.clone(),
            result,
        });
    }

    let human = outputs
        .iter()
        .map(render_analysis)
        .collect::<Vec<_>>()
        .join("\n");
    output_result(&human, &outputs, cli_args)
}

//! Integration tests for the end-to-end training pipeline.

use std::io::Write;

use resenha::dataset::{JsonlReviewProvider, ReviewRow, StaticReviewProvider};
use resenha::error::ResenhaError;
use resenha::lexicon::BundledLexicon;
use resenha::pipeline::{PipelineConfig, TrainingPipeline};

fn balanced_rows(negatives: usize, positives: usize) -> Vec<ReviewRow> {
    let negative_texts = [
        "Péssimo produto, chegou quebrado.",
        "A entrega atrasou demais, horrível.",
        "Não recebi nenhuma satisfação.",
        "Produto ruim, não funciona.",
        "Qualidade horrível, dinheiro jogado fora.",
        "Veio com defeito e ninguém responde.",
    ];
    let positive_texts = [
        "Ótimo produto, recomendo muito!",
        "Entrega rápida e produto perfeito.",
        "Excelente qualidade, amei.",
        "Chegou antes do prazo, embalagem perfeita.",
        "Produto muito bom, funciona bem.",
        "Superou as expectativas, incrível.",
    ];

    let mut rows = Vec::new();
    for i in 0..negatives {
        rows.push(ReviewRow::new("1", negative_texts[i % negative_texts.len()]));
    }
    for i in 0..positives {
        rows.push(ReviewRow::new("5", positive_texts[i % positive_texts.len()]));
    }
    rows
}

#[test]
fn training_balances_an_imbalanced_corpus() {
    let mut rows = balanced_rows(4, 12);
    // Noise rows the pipeline must filter out.
    rows.push(ReviewRow::new("3", "Mediano, nada demais."));
    rows.push(ReviewRow::new("5", "review_comment_message"));
    rows.push(ReviewRow::new("não numérico", "Sem score."));
    rows.push(ReviewRow::new("5", "    "));

    let provider = StaticReviewProvider::new(rows);
    let report = TrainingPipeline::default()
        .run(&provider, &BundledLexicon::new())
        .unwrap();

    assert_eq!(report.counts_before, (4, 12));
    assert_eq!(report.counts_after, (12, 12));
    assert_eq!(report.train_size + report.test_size, 24);
    // Stratification holds both classes on the holdout.
    assert!(report.evaluation.negative.support > 0);
    assert!(report.evaluation.positive.support > 0);
}

#[test]
fn training_is_deterministic_for_a_fixed_seed() {
    let provider = StaticReviewProvider::new(balanced_rows(5, 9));
    let pipeline = TrainingPipeline::default();
    let lexicons = BundledLexicon::new();

    let first = pipeline.run(&provider, &lexicons).unwrap();
    let second = pipeline.run(&provider, &lexicons).unwrap();

    assert_eq!(first.evaluation.accuracy, second.evaluation.accuracy);
    assert_eq!(first.evaluation.confusion, second.evaluation.confusion);
    assert_eq!(first.counts_after, second.counts_after);
}

#[test]
fn different_seeds_may_change_the_split_but_not_the_contract() {
    let provider = StaticReviewProvider::new(balanced_rows(6, 6));
    let lexicons = BundledLexicon::new();

    for seed in [1, 7, 42] {
        let config = PipelineConfig {
            seed,
            ..PipelineConfig::default()
        };
        let report = TrainingPipeline::new(config).run(&provider, &lexicons).unwrap();
        assert_eq!(report.counts_after, (6, 6));
        assert!((0.0..=1.0).contains(&report.evaluation.accuracy));
    }
}

#[test]
fn jsonl_corpus_trains_end_to_end() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for row in balanced_rows(6, 6) {
        writeln!(file, "{}", serde_json::to_string(&row).unwrap()).unwrap();
    }
    writeln!(file, "este linha não é json").unwrap();

    let provider = JsonlReviewProvider::new(file.path());
    let report = TrainingPipeline::default()
        .run(&provider, &BundledLexicon::new())
        .unwrap();

    assert_eq!(report.rows_fetched, 12);
    assert_eq!(report.counts_before, (6, 6));
}

#[test]
fn provider_failure_surfaces_as_data_unavailable() {
    let provider = JsonlReviewProvider::new("/nonexistent/path/reviews.jsonl");
    match TrainingPipeline::default().run(&provider, &BundledLexicon::new()) {
        Err(ResenhaError::DataUnavailable(_)) => {}
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn single_class_corpus_surfaces_as_insufficient_data() {
    let provider = StaticReviewProvider::new(balanced_rows(0, 8));
    match TrainingPipeline::default().run(&provider, &BundledLexicon::new()) {
        Err(ResenhaError::InsufficientData(_)) => {}
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn neutral_scores_never_reach_training() {
    let mut rows = balanced_rows(4, 4);
    for _ in 0..10 {
        rows.push(ReviewRow::new("3", "Mediano."));
    }

    let provider = StaticReviewProvider::new(rows);
    let report = TrainingPipeline::default()
        .run(&provider, &BundledLexicon::new())
        .unwrap();

    // The query itself excludes score 3, so fetched rows already omit them.
    assert_eq!(report.rows_fetched, 8);
    assert_eq!(report.counts_before, (4, 4));
}

//! Detector tests against an in-memory classifier.
//!
//! Cover chunking limits, aggregation, the short-text rule and per-sentence
//! highlighting with its degradation path.

mod common;

use std::sync::Arc;

use common::{FailingClassifier, MANIPULATIVE_TEXT, ScriptedClassifier};
use psychoguard::analysis::{ManipulationDetector, ScoringConfig, TEXT_MODEL};
use psychoguard::types::{AnalysisResult, ClassifyMode, Severity, Tactic};

fn words(n: usize) -> String {
    (0..n).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ")
}

// ============================================================================
// analyze_text
// ============================================================================

#[tokio::test]
async fn scores_and_ranks_tactics() {
    let classifier = Arc::new(ScriptedClassifier::new([0.9, 0.8, 0.1, 0.7, 0.2, 0.3]));
    let detector = ManipulationDetector::new(classifier.clone());

    let analysis = detector.analyze_text(MANIPULATIVE_TEXT).await.unwrap();

    assert!((analysis.overall_score - 90.0).abs() < 0.05);
    assert_eq!(analysis.severity, Severity::High);
    assert_eq!(analysis.severity_color, "#ef4444");
    assert_eq!(
        analysis.top_tactics,
        vec![
            Tactic::FearUrgency,
            Tactic::FalseSocialProof,
            Tactic::EmotionalHijacking
        ]
    );
    assert_eq!(analysis.tactic_scores.len(), 6);
    assert_eq!(analysis.tactic_scores[&Tactic::IdentityAttack], 10.0);
    assert_eq!(analysis.tactic_colors[&Tactic::FearUrgency], "#ff4d6a");
    assert_eq!(analysis.chunks_analyzed, 1);
    assert_eq!(analysis.word_count, 14);

    let seen = classifier.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].1, ClassifyMode::MultiLabel);
}

#[tokio::test]
async fn every_call_uses_the_fixed_text_model() {
    let classifier = Arc::new(ScriptedClassifier::new([0.5; 6]));
    let detector = ManipulationDetector::new(classifier.clone());
    assert_eq!(detector.model_name(), TEXT_MODEL);

    detector.analyze_text(MANIPULATIVE_TEXT).await.unwrap();
    detector.highlight_sentences(MANIPULATIVE_TEXT).await;

    let models = classifier.models();
    assert_eq!(models.len(), 3);
    assert!(models.iter().all(|m| m == TEXT_MODEL));
}

#[tokio::test]
async fn overall_score_is_clamped_to_100() {
    let classifier = Arc::new(ScriptedClassifier::new([0.95; 6]));
    let detector = ManipulationDetector::new(classifier);

    let analysis = detector.analyze_text(MANIPULATIVE_TEXT).await.unwrap();
    assert_eq!(analysis.overall_score, 100.0);
    assert_eq!(analysis.top_tactics.len(), 3);
}

#[tokio::test]
async fn low_scores_have_no_top_tactics() {
    let classifier = Arc::new(ScriptedClassifier::new([0.1, 0.05, 0.0, 0.2, 0.25, 0.0]));
    let detector = ManipulationDetector::new(classifier);

    let analysis = detector
        .analyze_text("The weather today is mild with light wind.")
        .await
        .unwrap();
    assert!(analysis.top_tactics.is_empty());
    assert_eq!(analysis.severity, Severity::Low);
    assert!(analysis.overall_score < 40.0);
}

#[tokio::test]
async fn short_text_skips_the_classifier() {
    let classifier = Arc::new(ScriptedClassifier::new([0.9; 6]));
    let detector = ManipulationDetector::new(classifier.clone());

    let analysis = detector.analyze_text("   hi there  ").await.unwrap();
    assert_eq!(analysis, AnalysisResult::empty());
    assert_eq!(classifier.calls(), 0);
}

#[tokio::test]
async fn long_text_is_chunked() {
    let classifier = Arc::new(ScriptedClassifier::new([0.5; 6]));
    let detector = ManipulationDetector::new(classifier.clone());

    let analysis = detector.analyze_text(&words(900)).await.unwrap();
    assert_eq!(analysis.chunks_analyzed, 3);
    assert_eq!(analysis.word_count, 900);
    assert_eq!(classifier.calls(), 3);

    let seen = classifier.seen();
    assert_eq!(seen[0].0.split_whitespace().count(), 400);
    assert_eq!(seen[2].0.split_whitespace().count(), 100);
}

#[tokio::test]
async fn only_the_first_chunks_are_classified() {
    let classifier = Arc::new(ScriptedClassifier::new([0.5; 6]));
    let detector = ManipulationDetector::new(classifier.clone());

    let analysis = detector.analyze_text(&words(2500)).await.unwrap();
    assert_eq!(analysis.chunks_analyzed, 5);
    assert_eq!(analysis.word_count, 2500);
    assert_eq!(classifier.calls(), 5);
}

#[tokio::test]
async fn custom_scoring_config_applies() {
    let classifier = Arc::new(ScriptedClassifier::new([0.5; 6]));
    let config = ScoringConfig {
        chunk_words: 10,
        max_chunks: 2,
        ..ScoringConfig::default()
    };
    let detector = ManipulationDetector::with_config(classifier.clone(), config);

    let analysis = detector.analyze_text(&words(45)).await.unwrap();
    assert_eq!(analysis.chunks_analyzed, 2);
    assert_eq!(classifier.calls(), 2);
}

#[tokio::test]
async fn classifier_failure_propagates() {
    let detector = ManipulationDetector::new(Arc::new(FailingClassifier));
    let result = detector.analyze_text(MANIPULATIVE_TEXT).await;
    assert!(result.is_err());
}

// ============================================================================
// highlight_sentences
// ============================================================================

#[tokio::test]
async fn highlights_each_sentence() {
    let classifier =
        Arc::new(ScriptedClassifier::new([0.0; 6]).single(Tactic::FalseSocialProof, 0.5));
    let detector = ManipulationDetector::new(classifier.clone());

    let highlights = detector.highlight_sentences(MANIPULATIVE_TEXT).await;

    assert_eq!(highlights.len(), 2);
    assert_eq!(highlights[0].text, "Act now before it's too late!");
    assert!((highlights[0].score - 0.9).abs() < 1e-9);
    assert_eq!(highlights[0].tactic, Some(Tactic::FalseSocialProof));
    assert_eq!(
        highlights[1].text,
        "Everyone is buying this, don't be left behind!"
    );
    assert!(
        classifier
            .seen()
            .iter()
            .all(|(_, mode)| *mode == ClassifyMode::SingleLabel)
    );
}

#[tokio::test]
async fn short_sentences_are_not_classified() {
    let classifier = Arc::new(ScriptedClassifier::new([0.0; 6]).single(Tactic::Gaslighting, 0.9));
    let detector = ManipulationDetector::new(classifier.clone());

    let highlights = detector
        .highlight_sentences("Buy now! This offer is really amazing today.")
        .await;

    assert_eq!(highlights.len(), 2);
    assert_eq!(highlights[0].text, "Buy now!");
    assert_eq!(highlights[0].score, 0.0);
    assert_eq!(highlights[0].tactic, None);
    // 0.9 × 1.8 is clamped to 1
    assert_eq!(highlights[1].score, 1.0);
    assert_eq!(highlights[1].tactic, Some(Tactic::Gaslighting));
    assert_eq!(classifier.calls(), 1);
}

#[tokio::test]
async fn weak_sentences_carry_no_tactic() {
    let classifier = Arc::new(ScriptedClassifier::new([0.0; 6]).single(Tactic::FearUrgency, 0.25));
    let detector = ManipulationDetector::new(classifier);

    let highlights = detector
        .highlight_sentences("The meeting is scheduled for Tuesday afternoon.")
        .await;

    assert_eq!(highlights.len(), 1);
    assert!((highlights[0].score - 0.45).abs() < 1e-9);
    assert_eq!(highlights[0].tactic, None);
}

#[tokio::test]
async fn highlights_are_capped() {
    let classifier = Arc::new(ScriptedClassifier::new([0.0; 6]));
    let detector = ManipulationDetector::new(classifier.clone());

    let text = (0..25)
        .map(|i| format!("This is sentence number {i}."))
        .collect::<Vec<_>>()
        .join(" ");
    let highlights = detector.highlight_sentences(&text).await;

    assert_eq!(highlights.len(), 20);
    assert_eq!(highlights[19].text, "This is sentence number 19.");
    assert_eq!(classifier.calls(), 20);
}

#[tokio::test]
async fn failed_sentence_degrades_alone() {
    let classifier = Arc::new(
        ScriptedClassifier::new([0.0; 6])
            .single(Tactic::FearUrgency, 0.6)
            .fail_on("Everyone"),
    );
    let detector = ManipulationDetector::new(classifier);

    let highlights = detector.highlight_sentences(MANIPULATIVE_TEXT).await;

    assert_eq!(highlights.len(), 2);
    assert_eq!(highlights[0].tactic, Some(Tactic::FearUrgency));
    assert_eq!(highlights[1].score, 0.0);
    assert_eq!(highlights[1].tactic, None);
}

#[tokio::test]
async fn empty_text_has_no_highlights() {
    let detector = ManipulationDetector::new(Arc::new(FailingClassifier));
    assert!(detector.highlight_sentences("   ").await.is_empty());
}

//! Report layout and rendering tests.

mod common;

use std::path::Path;
use std::sync::Arc;

use common::{MANIPULATIVE_TEXT, ScriptedClassifier};
use psychoguard::analysis::ManipulationDetector;
use psychoguard::explain::{ExplanationGenerator, MISSING_CREDENTIAL_MESSAGE};
use psychoguard::report::{ExplanationBlock, FOOTER, ReportLayout, ReportRenderer, RiskLevel, TITLE};
use psychoguard::types::{Explanation, Section, Severity, Tactic};

const FONT_DIR: &str = "/usr/share/fonts/truetype/liberation";
const FONT_FAMILY: &str = "LiberationSans";

#[tokio::test]
async fn report_without_llm_shows_the_credential_hint() {
    let detector = ManipulationDetector::new(Arc::new(ScriptedClassifier::new([
        0.8, 0.7, 0.1, 0.3, 0.4, 0.05,
    ])));
    let explainer = ExplanationGenerator::new(None);

    let analysis = detector.analyze_text(MANIPULATIVE_TEXT).await.unwrap();
    let explanation = explainer.generate(MANIPULATIVE_TEXT, &analysis).await;
    let layout = ReportLayout::build(MANIPULATIVE_TEXT, &analysis, &explanation, None);

    assert_eq!(layout.title, TITLE);
    assert_eq!(layout.footer, FOOTER);
    assert!(layout.generated.starts_with("Generated "));
    assert_eq!(layout.rows.len(), 6);
    assert_eq!(
        layout.rows.iter().map(|r| r.tactic).collect::<Vec<_>>(),
        Tactic::ALL.to_vec()
    );
    assert_eq!(
        layout.explanation,
        ExplanationBlock::Raw(MISSING_CREDENTIAL_MESSAGE.to_string())
    );
    assert_eq!(layout.excerpt, MANIPULATIVE_TEXT);
    assert!(layout.source.is_none());
}

#[tokio::test]
async fn rows_carry_score_and_risk() {
    let detector = ManipulationDetector::new(Arc::new(ScriptedClassifier::new([
        0.8, 0.35, 0.1, 0.6, 0.0, 0.349,
    ])));
    let analysis = detector.analyze_text(MANIPULATIVE_TEXT).await.unwrap();
    let layout = ReportLayout::build(MANIPULATIVE_TEXT, &analysis, &Explanation::disabled(), None);

    let row = |tactic: Tactic| layout.rows.iter().find(|r| r.tactic == tactic).unwrap();
    assert_eq!(row(Tactic::FearUrgency).score, "80.0/100");
    assert_eq!(row(Tactic::FearUrgency).risk, RiskLevel::High);
    assert_eq!(row(Tactic::FalseSocialProof).risk, RiskLevel::Moderate);
    assert_eq!(row(Tactic::EmotionalHijacking).risk, RiskLevel::High);
    assert_eq!(row(Tactic::ScarcityIllusion).score, "0.0/100");
    assert_eq!(row(Tactic::ScarcityIllusion).risk, RiskLevel::Low);
    assert_eq!(row(Tactic::Gaslighting).risk, RiskLevel::Low);

    assert_eq!(layout.overview.severity, analysis.severity);
    assert_eq!(layout.overview.tactics_found, analysis.top_tactics.len());
    assert_eq!(
        layout.explanation,
        ExplanationBlock::Raw("LLM disabled".to_string())
    );
}

#[test]
fn overview_and_source_lines() {
    let mut analysis = psychoguard::AnalysisResult::empty();
    analysis.overall_score = 72.5;
    analysis.severity = Severity::High;
    analysis.top_tactics = vec![Tactic::FearUrgency];

    let mut explanation = Explanation::default();
    explanation
        .sections
        .insert(Section::Summary, "Urgency everywhere.".to_string());
    explanation
        .sections
        .insert(Section::Verdict, "Manipulative.".to_string());

    let text = "word ".repeat(300);
    let layout = ReportLayout::build(&text, &analysis, &explanation, Some("https://news.example/x"));

    assert_eq!(layout.overview.score, "72.5/100");
    assert_eq!(layout.overview.tactics_found, 1);
    assert_eq!(layout.source.as_deref(), Some("Source: https://news.example/x"));
    assert!(layout.excerpt.ends_with('…'));
    match &layout.explanation {
        ExplanationBlock::Sections(sections) => {
            assert_eq!(sections.len(), 2);
            assert_eq!(sections[0].0, Section::Summary);
            assert_eq!(sections[1].0, Section::Verdict);
        }
        other => panic!("expected sections, got {other:?}"),
    }
}

#[test]
fn renders_pdf_when_fonts_are_installed() {
    if !Path::new(FONT_DIR).join("LiberationSans-Regular.ttf").exists() {
        eprintln!("skipping: {FONT_FAMILY} not installed");
        return;
    }

    let renderer = ReportRenderer::new(FONT_DIR, FONT_FAMILY).unwrap();
    let pdf = renderer
        .render(
            MANIPULATIVE_TEXT,
            &psychoguard::AnalysisResult::empty(),
            &Explanation::disabled(),
            Some("https://example.com"),
        )
        .unwrap();

    assert!(pdf.starts_with(b"%PDF"));
}

#[test]
fn missing_font_family_fails_at_construction() {
    let dir = tempfile::tempdir().unwrap();
    assert!(ReportRenderer::new(dir.path(), FONT_FAMILY).is_err());
}

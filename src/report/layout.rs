//! Renderer-independent content of a PDF report.

use chrono::{DateTime, Local};

use crate::types::{AnalysisResult, Explanation, Section, Severity, Tactic};

pub const TITLE: &str = "PsychoGuard AI: Manipulation Analysis Report";
pub const FOOTER: &str =
    "PsychoGuard AI · Protecting minds from digital manipulation · For research & educational use";

/// Characters of the analyzed text reproduced in the excerpt.
pub const EXCERPT_CHARS: usize = 800;

const TIMESTAMP_FORMAT: &str = "%B %d, %Y at %H:%M";

/// Risk tier of a single tactic row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 60.0 {
            RiskLevel::High
        } else if score >= 35.0 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::High => "HIGH",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    /// `"<score>/100"`.
    pub score: String,
    pub severity: Severity,
    pub tactics_found: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TacticRow {
    pub tactic: Tactic,
    /// `"<v:.1>/100"`.
    pub score: String,
    pub risk: RiskLevel,
}

/// What the explanation part of the report shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ExplanationBlock {
    /// Parsed sections, in heading order, empty bodies skipped.
    Sections(Vec<(Section, String)>),
    /// Unparsed explanation text, e.g. the disabled placeholder.
    Raw(String),
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    pub title: &'static str,
    pub generated: String,
    pub overview: Overview,
    pub rows: Vec<TacticRow>,
    pub explanation: ExplanationBlock,
    pub excerpt: String,
    pub source: Option<String>,
    pub footer: &'static str,
}

impl ReportLayout {
    pub fn build(
        text: &str,
        analysis: &AnalysisResult,
        explanation: &Explanation,
        url: Option<&str>,
    ) -> Self {
        Self::build_at(text, analysis, explanation, url, Local::now())
    }

    /// Like [`build`](Self::build) with an explicit generation time.
    pub fn build_at(
        text: &str,
        analysis: &AnalysisResult,
        explanation: &Explanation,
        url: Option<&str>,
        generated: DateTime<Local>,
    ) -> Self {
        let rows = Tactic::ALL
            .into_iter()
            .map(|tactic| {
                let score = analysis.tactic_scores.get(&tactic).copied().unwrap_or(0.0);
                TacticRow {
                    tactic,
                    score: format!("{score:.1}/100"),
                    risk: RiskLevel::from_score(score),
                }
            })
            .collect();

        Self {
            title: TITLE,
            generated: format!("Generated {}", generated.format(TIMESTAMP_FORMAT)),
            overview: Overview {
                score: format!("{:.1}/100", analysis.overall_score),
                severity: analysis.severity,
                tactics_found: analysis.top_tactics.len(),
            },
            rows,
            explanation: explanation_block(explanation),
            excerpt: excerpt(text),
            source: url.filter(|u| !u.is_empty()).map(|u| format!("Source: {u}")),
            footer: FOOTER,
        }
    }
}

fn explanation_block(explanation: &Explanation) -> ExplanationBlock {
    let sections: Vec<(Section, String)> = explanation
        .sections
        .iter()
        .filter(|(_, body)| !body.is_empty())
        .map(|(section, body)| (*section, body.clone()))
        .collect();

    if !sections.is_empty() {
        ExplanationBlock::Sections(sections)
    } else if !explanation.full_explanation.is_empty() {
        ExplanationBlock::Raw(explanation.full_explanation.clone())
    } else {
        ExplanationBlock::None
    }
}

fn excerpt(text: &str) -> String {
    let mut chars = text.chars();
    let mut excerpt: String = chars.by_ref().take(EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        excerpt.push('…');
    }
    excerpt
}

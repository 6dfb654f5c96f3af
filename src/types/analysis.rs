//! Aggregated text analysis and highlight types

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::tactic::Tactic;

/// Severity tier derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Moderate,
    High,
}

impl Severity {
    /// Lower bound (inclusive) of the `MODERATE` tier.
    pub const MODERATE_THRESHOLD: f64 = 40.0;
    /// Lower bound (inclusive) of the `HIGH` tier.
    pub const HIGH_THRESHOLD: f64 = 70.0;

    /// Tier for an overall score in [0, 100].
    pub fn from_score(score: f64) -> Self {
        if score >= Self::HIGH_THRESHOLD {
            Severity::High
        } else if score >= Self::MODERATE_THRESHOLD {
            Severity::Moderate
        } else {
            Severity::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Moderate => "MODERATE",
            Severity::High => "HIGH",
        }
    }

    /// Display color as a hex token.
    pub fn color(self) -> &'static str {
        match self {
            Severity::Low => "#22c55e",
            Severity::Moderate => "#f59e0b",
            Severity::High => "#ef4444",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of scoring a text for manipulation tactics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Overall manipulation score in [0, 100], one decimal.
    pub overall_score: f64,
    pub severity: Severity,
    pub severity_color: String,
    /// Per-tactic score in [0, 100], one decimal. Always holds every tactic.
    pub tactic_scores: BTreeMap<Tactic, f64>,
    pub tactic_colors: BTreeMap<Tactic, String>,
    /// Up to three tactics above the detection threshold, strongest first.
    pub top_tactics: Vec<Tactic>,
    pub tactic_descriptions: BTreeMap<Tactic, String>,
    pub chunks_analyzed: usize,
    pub word_count: usize,
}

impl AnalysisResult {
    /// Canonical result for text too short to analyze.
    pub fn empty() -> Self {
        let severity = Severity::Low;
        Self {
            overall_score: 0.0,
            severity,
            severity_color: severity.color().to_string(),
            tactic_scores: Tactic::ALL.into_iter().map(|t| (t, 0.0)).collect(),
            tactic_colors: tactic_colors(),
            top_tactics: Vec::new(),
            tactic_descriptions: tactic_descriptions(),
            chunks_analyzed: 0,
            word_count: 0,
        }
    }
}

pub(crate) fn tactic_colors() -> BTreeMap<Tactic, String> {
    Tactic::ALL
        .into_iter()
        .map(|t| (t, t.color().to_string()))
        .collect()
}

pub(crate) fn tactic_descriptions() -> BTreeMap<Tactic, String> {
    Tactic::ALL
        .into_iter()
        .map(|t| (t, t.description().to_string()))
        .collect()
}

/// Per-sentence salience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub text: String,
    /// Rescaled salience in [0, 1], three decimals.
    pub score: f64,
    pub tactic: Option<Tactic>,
}

impl Highlight {
    /// A sentence that was not (or could not be) classified.
    pub fn unscored(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            score: 0.0,
            tactic: None,
        }
    }
}

/// Reduced payload served by `/quick-score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickScore {
    pub overall_score: f64,
    pub severity: Severity,
    pub severity_color: String,
    pub top_tactics: Vec<Tactic>,
}

impl From<AnalysisResult> for QuickScore {
    fn from(analysis: AnalysisResult) -> Self {
        Self {
            overall_score: analysis.overall_score,
            severity: analysis.severity,
            severity_color: analysis.severity_color,
            top_tactics: analysis.top_tactics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_boundaries_are_inclusive_on_lower_edge() {
        assert_eq!(Severity::from_score(0.0), Severity::Low);
        assert_eq!(Severity::from_score(39.99), Severity::Low);
        assert_eq!(Severity::from_score(40.0), Severity::Moderate);
        assert_eq!(Severity::from_score(69.99), Severity::Moderate);
        assert_eq!(Severity::from_score(70.0), Severity::High);
        assert_eq!(Severity::from_score(100.0), Severity::High);
    }

    #[test]
    fn empty_result_serializes_all_tactics_in_order() {
        let json = serde_json::to_value(AnalysisResult::empty()).unwrap();
        let keys: Vec<&String> = json["tactic_scores"].as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 6);
        assert_eq!(json["severity"], "LOW");
        assert_eq!(json["severity_color"], "#22c55e");
        assert_eq!(json["chunks_analyzed"], 0);
        assert_eq!(json["word_count"], 0);
        assert!(json["top_tactics"].as_array().unwrap().is_empty());
    }

    #[test]
    fn unscored_highlight_serializes_null_tactic() {
        let json = serde_json::to_value(Highlight::unscored("Hi there.")).unwrap();
        assert_eq!(json["score"], 0.0);
        assert!(json["tactic"].is_null());
    }
}

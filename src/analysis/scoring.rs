//! Score aggregation and rescaling.
//!
//! Everything here is pure: given per-chunk classifier scores it produces
//! the aggregated [`AnalysisResult`]. The detector supplies the scores.

use serde::Deserialize;

use crate::types::{AnalysisResult, Severity, Tactic, tactic_colors, tactic_descriptions};

/// Tuning values for chunking, aggregation and highlighting.
///
/// The rescale factors are empirical. Severity thresholds are defined
/// relative to `score_scale`, so changing it shifts every tier.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Words per classifier chunk.
    pub chunk_words: usize,
    /// Chunks classified per text; the rest are ignored.
    pub max_chunks: usize,
    /// Multiplier from mean tactic score (0..1) to overall score (0..100).
    pub score_scale: f64,
    /// Mean score a tactic must exceed to be listed as a top tactic.
    pub top_tactic_threshold: f64,
    pub max_top_tactics: usize,
    /// Multiplier applied to a sentence's top label score, clamped to 1.
    pub highlight_scale: f64,
    /// Unscaled top score a sentence must exceed to carry a tactic.
    pub highlight_tactic_threshold: f64,
    pub max_highlights: usize,
    /// Sentences shorter than this are not classified.
    pub min_highlight_words: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            chunk_words: 400,
            max_chunks: 5,
            score_scale: 180.0,
            top_tactic_threshold: 0.25,
            max_top_tactics: 3,
            highlight_scale: 1.8,
            highlight_tactic_threshold: 0.3,
            max_highlights: 20,
            min_highlight_words: 4,
        }
    }
}

/// Per-tactic scores in [0, 1] for one chunk, in label-set order.
pub type ChunkScores = [f64; 6];

/// Round to `places` decimal places, ties to even.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

/// Arithmetic mean of each tactic across chunks. Empty input yields zeros.
pub fn tactic_means(chunks: &[ChunkScores]) -> ChunkScores {
    let mut means = [0.0; 6];
    if chunks.is_empty() {
        return means;
    }
    for chunk in chunks {
        for (mean, score) in means.iter_mut().zip(chunk) {
            *mean += score;
        }
    }
    let n = chunks.len() as f64;
    means.iter_mut().for_each(|m| *m /= n);
    means
}

/// Overall score: mean of tactic means, rescaled and clamped to 100.
pub fn overall_score(means: &ChunkScores, config: &ScoringConfig) -> f64 {
    let raw = means.iter().sum::<f64>() / means.len() as f64;
    (raw * config.score_scale).min(100.0)
}

/// Tactics above the threshold, strongest first, ties in label-set order.
pub fn top_tactics(means: &ChunkScores, config: &ScoringConfig) -> Vec<Tactic> {
    let mut ranked: Vec<(Tactic, f64)> = Tactic::ALL.into_iter().zip(*means).collect();
    // sort_by is stable: equal scores keep label-set order
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked
        .into_iter()
        .filter(|(_, score)| *score > config.top_tactic_threshold)
        .take(config.max_top_tactics)
        .map(|(tactic, _)| tactic)
        .collect()
}

/// Combine per-chunk scores into the final result.
pub fn aggregate(chunks: &[ChunkScores], word_count: usize, config: &ScoringConfig) -> AnalysisResult {
    let means = tactic_means(chunks);
    let overall = overall_score(&means, config);
    let severity = Severity::from_score(overall);

    AnalysisResult {
        overall_score: round_to(overall, 1),
        severity,
        severity_color: severity.color().to_string(),
        tactic_scores: Tactic::ALL
            .into_iter()
            .zip(means)
            .map(|(tactic, mean)| (tactic, round_to(mean * 100.0, 1)))
            .collect(),
        tactic_colors: tactic_colors(),
        top_tactics: top_tactics(&means, config),
        tactic_descriptions: tactic_descriptions(),
        chunks_analyzed: chunks.len(),
        word_count,
    }
}

//! Manipulation detector: chunked text scoring and sentence highlighting.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use super::highlight::split_sentences;
use super::scoring::{self, ChunkScores, ScoringConfig, round_to};
use crate::providers::ClassifyProvider;
use crate::telemetry;
use crate::types::{AnalysisResult, ClassifyMode, ClassifyResult, Highlight, Tactic};
use crate::Result;

/// Zero-shot model used for tactic classification.
pub const TEXT_MODEL: &str = "facebook/bart-large-mnli";

/// Minimum trimmed length (in characters) of analyzable text.
pub const MIN_TEXT_CHARS: usize = 10;

/// Whether `text` is long enough to analyze.
pub fn is_analyzable(text: &str) -> bool {
    text.trim().chars().count() >= MIN_TEXT_CHARS
}

/// Split text into chunks of at most `size` whitespace-separated words.
///
/// Falls back to the whole text as one chunk when no words remain.
pub fn chunk_text(text: &str, size: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let chunks: Vec<String> = words
        .chunks(size.max(1))
        .map(|chunk| chunk.join(" "))
        .filter(|chunk| !chunk.trim().is_empty())
        .collect();

    if chunks.is_empty() {
        vec![text.to_string()]
    } else {
        chunks
    }
}

/// Scores text against the fixed tactic label set.
///
/// Holds the shared classifier; every call is independent, so one detector
/// serves all requests concurrently.
pub struct ManipulationDetector {
    classifier: Arc<dyn ClassifyProvider>,
    model: String,
    config: ScoringConfig,
}

impl ManipulationDetector {
    pub fn new(classifier: Arc<dyn ClassifyProvider>) -> Self {
        Self::with_config(classifier, ScoringConfig::default())
    }

    pub fn with_config(classifier: Arc<dyn ClassifyProvider>, config: ScoringConfig) -> Self {
        Self {
            classifier,
            model: TEXT_MODEL.to_string(),
            config,
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score `text` for manipulation tactics.
    ///
    /// Text under [`MIN_TEXT_CHARS`] trimmed characters yields
    /// [`AnalysisResult::empty`] without calling the classifier. Classifier
    /// errors propagate.
    #[instrument(name = "detector.analyze", skip(self, text), fields(chars = text.len()))]
    pub async fn analyze_text(&self, text: &str) -> Result<AnalysisResult> {
        if !is_analyzable(text) {
            return Ok(AnalysisResult::empty());
        }

        let word_count = text.split_whitespace().count();
        let chunks = chunk_text(text, self.config.chunk_words);
        let mut chunk_scores: Vec<ChunkScores> = Vec::with_capacity(self.config.max_chunks);

        for chunk in chunks.iter().take(self.config.max_chunks) {
            let result = self.classify(chunk, ClassifyMode::MultiLabel).await?;
            chunk_scores.push(Tactic::ALL.map(|t| f64::from(result.score(t.label()))));
        }

        debug!(
            chunks = chunks.len(),
            classified = chunk_scores.len(),
            word_count,
            "text classified"
        );

        Ok(scoring::aggregate(&chunk_scores, word_count, &self.config))
    }

    /// Per-sentence salience for up to `max_highlights` sentences.
    ///
    /// A failed classification degrades only its own sentence.
    #[instrument(name = "detector.highlight", skip(self, text))]
    pub async fn highlight_sentences(&self, text: &str) -> Vec<Highlight> {
        let sentences = split_sentences(text);
        let mut highlights = Vec::with_capacity(sentences.len().min(self.config.max_highlights));

        for sentence in sentences.into_iter().take(self.config.max_highlights) {
            if sentence.split_whitespace().count() < self.config.min_highlight_words {
                highlights.push(Highlight::unscored(sentence));
                continue;
            }

            match self.classify(sentence, ClassifyMode::SingleLabel).await {
                Ok(result) => highlights.push(self.highlight_from(sentence, &result)),
                Err(e) => {
                    warn!(error = %e, "sentence classification failed, scoring as 0");
                    telemetry::record_degraded("highlight");
                    highlights.push(Highlight::unscored(sentence));
                }
            }
        }

        highlights
    }

    fn highlight_from(&self, sentence: &str, result: &ClassifyResult) -> Highlight {
        let top = f64::from(result.confidence);
        let scaled = (top * self.config.highlight_scale).min(1.0);
        let tactic = if top > self.config.highlight_tactic_threshold {
            Tactic::from_label(&result.top_label)
        } else {
            None
        };

        Highlight {
            text: sentence.to_string(),
            score: round_to(scaled, 3),
            tactic,
        }
    }

    async fn classify(&self, text: &str, mode: ClassifyMode) -> Result<ClassifyResult> {
        let labels = Tactic::labels();
        let result = self
            .classifier
            .classify_zero_shot(text, &labels, mode, &self.model)
            .await;

        let status = if result.is_ok() { "ok" } else { "error" };
        metrics::counter!(telemetry::CLASSIFIER_CALLS_TOTAL,
            "mode" => mode.as_str(),
            "status" => status,
        )
        .increment(1);

        if let Err(ref e) = result
            && e.is_model_loading()
        {
            warn!(model = %self.model, provider = self.classifier.name(), "classifier model is still loading");
        }

        result
    }
}

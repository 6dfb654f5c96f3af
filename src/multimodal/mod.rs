//! Image/caption mismatch and clickbait-imagery analysis.
//!
//! Backed by a CLIP-style zero-shot image classifier. The capability is
//! decided once at startup: without a vision provider every call returns
//! `{available: false}` and nothing is attempted. Failures at request time
//! are reported in the result, never raised.

mod fetch;

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{instrument, warn};

pub use fetch::{FETCH_TIMEOUT, ImageFetcher};

use crate::analysis::scoring::round_to;
use crate::providers::ImageClassifyProvider;
use crate::telemetry;
use crate::types::{ImageClassifyResult, MultimodalResult, Verdict};
use crate::{PsychoGuardError, Result};

/// Vision-language model used for image/text similarity.
pub const VISION_MODEL: &str = "openai/clip-vit-base-patch32";

/// Prompts for clickbait mode; the first three describe clickbait imagery.
pub const CLICKBAIT_LABELS: [&str; 4] = [
    "shocking or sensational image designed to provoke outrage",
    "exaggerated facial expression of shock or disbelief",
    "misleading or deceptive visual thumbnail",
    "normal neutral informative image",
];

/// Number of leading [`CLICKBAIT_LABELS`] that count towards the score.
const CLICKBAIT_PROMPTS: usize = 3;

/// Contrasting text paired with a caption in caption mode.
pub fn unrelated_caption(caption: &str) -> String {
    format!("image completely unrelated to: {caption}")
}

struct Vision {
    provider: Arc<dyn ImageClassifyProvider>,
    fetcher: ImageFetcher,
}

/// Scores images against captions or clickbait prompts.
pub struct MultimodalAnalyzer {
    vision: Option<Vision>,
    model: String,
}

impl MultimodalAnalyzer {
    /// Analyzer with the vision capability.
    pub fn new(provider: Arc<dyn ImageClassifyProvider>, fetcher: ImageFetcher) -> Self {
        Self {
            vision: Some(Vision { provider, fetcher }),
            model: VISION_MODEL.to_string(),
        }
    }

    /// Analyzer whose vision model failed to initialize or was not configured.
    pub fn unavailable() -> Self {
        Self {
            vision: None,
            model: VISION_MODEL.to_string(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.vision.is_some()
    }

    /// Caption mode when `caption` is non-empty, clickbait mode otherwise.
    pub async fn analyze(&self, image_url: &str, caption: Option<&str>) -> MultimodalResult {
        match caption.filter(|c| !c.is_empty()) {
            Some(caption) => self.analyze_caption(image_url, caption).await,
            None => self.analyze_clickbait(image_url).await,
        }
    }

    /// Check whether an image matches its caption.
    #[instrument(name = "multimodal.caption", skip(self, caption))]
    pub async fn analyze_caption(&self, image_url: &str, caption: &str) -> MultimodalResult {
        let Some(vision) = self.gate(image_url) else {
            return MultimodalResult::unavailable();
        };

        let unrelated = unrelated_caption(caption);
        let labels = [caption, unrelated.as_str()];

        let scored = self.score_image(vision, image_url, &labels).await.and_then(|result| {
            let matched = label_score(&result, caption)?;
            let mismatched = label_score(&result, &unrelated)?;
            Ok((matched, mismatched))
        });

        match scored {
            Ok((matched, mismatched)) => {
                let match_probability = round_to(f64::from(matched) * 100.0, 1);
                let mismatch_score = round_to(f64::from(mismatched) * 100.0, 1);
                MultimodalResult::Caption {
                    match_probability,
                    mismatch_score,
                    verdict: Verdict::from_mismatch(mismatch_score),
                }
            }
            Err(e) => degraded(e),
        }
    }

    /// Score an image for clickbait-style visuals.
    #[instrument(name = "multimodal.clickbait", skip(self))]
    pub async fn analyze_clickbait(&self, image_url: &str) -> MultimodalResult {
        let Some(vision) = self.gate(image_url) else {
            return MultimodalResult::unavailable();
        };

        let scored = self
            .score_image(vision, image_url, &CLICKBAIT_LABELS)
            .await
            .and_then(|result| {
                CLICKBAIT_LABELS
                    .iter()
                    .map(|label| label_score(&result, label).map(f64::from))
                    .collect::<Result<Vec<f64>>>()
            });

        match scored {
            Ok(probs) => {
                let clickbait: f64 = probs.iter().take(CLICKBAIT_PROMPTS).sum();
                let label_scores: BTreeMap<String, f64> = CLICKBAIT_LABELS
                    .iter()
                    .zip(&probs)
                    .map(|(label, p)| (label.to_string(), round_to(p * 100.0, 1)))
                    .collect();
                MultimodalResult::Clickbait {
                    clickbait_score: round_to(clickbait * 100.0, 1),
                    label_scores,
                }
            }
            Err(e) => degraded(e),
        }
    }

    fn gate(&self, image_url: &str) -> Option<&Vision> {
        if image_url.is_empty() {
            return None;
        }
        self.vision.as_ref()
    }

    async fn score_image(
        &self,
        vision: &Vision,
        image_url: &str,
        labels: &[&str],
    ) -> Result<ImageClassifyResult> {
        let image = vision.fetcher.fetch(image_url).await?;
        vision
            .provider
            .classify_image(&image, labels, &self.model)
            .await
    }
}

fn label_score(result: &ImageClassifyResult, label: &str) -> Result<f32> {
    result
        .score(label)
        .ok_or_else(|| PsychoGuardError::InvalidInput(format!("no score for label '{label}'")))
}

fn degraded(error: PsychoGuardError) -> MultimodalResult {
    warn!(error = %error, "multimodal analysis failed");
    telemetry::record_degraded("multimodal");
    MultimodalResult::failed(error)
}

//! HuggingFace Inference API client for zero-shot text and image classification.
//!
//! This client uses HuggingFace's serverless inference endpoints (or any
//! self-hosted endpoint speaking the same protocol).
//! See: <https://huggingface.co/docs/api-inference/index>

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::traits::{ClassifyProvider, ImageClassifyProvider};
use crate::types::{ClassifyMode, ClassifyResult, ImageClassifyResult, LabelScore};
use crate::{PsychoGuardError, Result};

/// Default base URL for HuggingFace Inference API
pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";

/// Default request timeout for inference calls.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Client for HuggingFace Inference API.
///
/// Supports:
/// - Zero-shot text classification (multi-label and single-label)
/// - Zero-shot image classification (CLIP-style image/text similarity)
#[derive(Clone)]
pub struct HuggingFaceClient {
    api_key: String,
    http: Client,
    base_url: String,
}

impl HuggingFaceClient {
    /// Create a new HuggingFace client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (self-hosted endpoints, wiremock).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(api_key, base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with a custom base URL and request timeout.
    pub fn with_timeout(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PsychoGuardError::Configuration(format!("HTTP client: {e}")))?;

        Ok(Self {
            api_key: api_key.into(),
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Perform zero-shot classification.
    ///
    /// # Arguments
    /// * `text` - Text to classify
    /// * `labels` - Candidate labels
    /// * `mode` - Whether labels are scored independently or as one distribution
    /// * `model` - Full HuggingFace model ID (e.g., `facebook/bart-large-mnli`)
    #[instrument(name = "hf.classify", skip(self, text, labels, mode), fields(mode = mode.as_str()))]
    pub async fn classify(
        &self,
        text: &str,
        labels: &[&str],
        mode: ClassifyMode,
        model: &str,
    ) -> Result<ClassifyResult> {
        let url = format!("{}/models/{}", self.base_url, model);

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&ZeroShotRequest {
                inputs: text,
                parameters: ZeroShotParameters {
                    candidate_labels: labels.to_vec(),
                    multi_label: mode.is_multi_label(),
                },
            })
            .send()
            .await
            .map_err(|e| PsychoGuardError::Http(e.to_string()))?;

        self.handle_response_errors(&response, model)?;

        let result: ZeroShotResponse = response
            .json()
            .await
            .map_err(|e| PsychoGuardError::Http(e.to_string()))?;

        if result.labels.len() != result.scores.len() {
            return Err(PsychoGuardError::InvalidInput(format!(
                "classifier returned {} labels but {} scores",
                result.labels.len(),
                result.scores.len()
            )));
        }

        Ok(ClassifyResult::from_pairs(result.labels, result.scores))
    }

    /// Score an image against candidate texts.
    ///
    /// The image bytes are sent base64-encoded; the model returns one
    /// softmax probability per candidate label.
    ///
    /// # Arguments
    /// * `image` - Raw image bytes (any format the endpoint decodes)
    /// * `labels` - Candidate texts
    /// * `model` - Full HuggingFace model ID (e.g., `openai/clip-vit-base-patch32`)
    #[instrument(name = "hf.classify_image", skip(self, image, labels), fields(bytes = image.len()))]
    pub async fn classify_image(
        &self,
        image: &[u8],
        labels: &[&str],
        model: &str,
    ) -> Result<ImageClassifyResult> {
        let url = format!("{}/models/{}", self.base_url, model);
        let encoded = STANDARD.encode(image);

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&ImageZeroShotRequest {
                inputs: &encoded,
                parameters: ImageZeroShotParameters {
                    candidate_labels: labels.to_vec(),
                    hypothesis_template: VERBATIM_TEMPLATE,
                },
            })
            .send()
            .await
            .map_err(|e| PsychoGuardError::Http(e.to_string()))?;

        self.handle_response_errors(&response, model)?;

        let scores: Vec<LabelScore> = response
            .json()
            .await
            .map_err(|e| PsychoGuardError::Http(e.to_string()))?;

        if scores.is_empty() {
            return Err(PsychoGuardError::EmptyResponse);
        }

        Ok(ImageClassifyResult { scores })
    }

    /// Check response status and map to appropriate error.
    fn handle_response_errors(&self, response: &reqwest::Response, model: &str) -> Result<()> {
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        match status.as_u16() {
            401 => Err(PsychoGuardError::AuthenticationFailed),
            404 => Err(PsychoGuardError::ModelNotFound(model.to_string())),
            429 => {
                // Try to parse retry-after header
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .map(Duration::from_secs);
                Err(PsychoGuardError::RateLimited { retry_after })
            }
            503 => Err(PsychoGuardError::Api {
                status: 503,
                message: "Model is loading, please retry".to_string(),
            }),
            code => Err(PsychoGuardError::Api {
                status: code,
                message: format!("HuggingFace API error: {}", status),
            }),
        }
    }
}

#[derive(Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters<'a>,
}

#[derive(Serialize)]
struct ZeroShotParameters<'a> {
    candidate_labels: Vec<&'a str>,
    multi_label: bool,
}

#[derive(Deserialize)]
struct ZeroShotResponse {
    labels: Vec<String>,
    scores: Vec<f32>,
}

#[derive(Serialize)]
struct ImageZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ImageZeroShotParameters<'a>,
}

#[derive(Serialize)]
struct ImageZeroShotParameters<'a> {
    candidate_labels: Vec<&'a str>,
    hypothesis_template: &'static str,
}

/// Image labels are scored as given, without the "This is a photo of {}." wrapper.
const VERBATIM_TEMPLATE: &str = "{}";

// ============================================================================
// Provider Trait Implementations
// ============================================================================

#[async_trait]
impl ClassifyProvider for HuggingFaceClient {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn classify_zero_shot(
        &self,
        text: &str,
        labels: &[&str],
        mode: ClassifyMode,
        model: &str,
    ) -> Result<ClassifyResult> {
        HuggingFaceClient::classify(self, text, labels, mode, model).await
    }
}

#[async_trait]
impl ImageClassifyProvider for HuggingFaceClient {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn classify_image(
        &self,
        image: &[u8],
        labels: &[&str],
        model: &str,
    ) -> Result<ImageClassifyResult> {
        HuggingFaceClient::classify_image(self, image, labels, model).await
    }
}

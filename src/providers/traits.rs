//! Provider traits for capability-specific implementations.
//!
//! Providers implement one trait per capability rather than a single "god
//! trait", so the analysis components depend only on what they call:
//! - `ClassifyProvider`: zero-shot text classification (detector, highlighter)
//! - `ImageClassifyProvider`: image/text similarity (multimodal analyzer)
//! - `GenerateProvider`: single-turn completion (explanation generator)
//!
//! Tests substitute in-memory implementations at these seams.

use async_trait::async_trait;

use crate::Result;
use crate::types::{
    ClassifyMode, ClassifyResult, GenerateOptions, GenerateResponse, ImageClassifyResult,
};

// ============================================================================
// Classification Provider
// ============================================================================

/// Provider for zero-shot text classification.
#[async_trait]
pub trait ClassifyProvider: Send + Sync {
    /// Provider name for logging/debugging.
    fn name(&self) -> &str;

    /// Zero-shot classification with candidate labels.
    async fn classify_zero_shot(
        &self,
        text: &str,
        labels: &[&str],
        mode: ClassifyMode,
        model: &str,
    ) -> Result<ClassifyResult>;
}

// ============================================================================
// Image Classification Provider
// ============================================================================

/// Provider for zero-shot image classification against candidate texts.
///
/// Scores are the softmax of the image/text similarity logits, so they sum
/// to 1 across `labels`.
#[async_trait]
pub trait ImageClassifyProvider: Send + Sync {
    /// Provider name for logging/debugging.
    fn name(&self) -> &str;

    async fn classify_image(
        &self,
        image: &[u8],
        labels: &[&str],
        model: &str,
    ) -> Result<ImageClassifyResult>;
}

// ============================================================================
// Generate Provider
// ============================================================================

/// Provider for single-turn text generation.
#[async_trait]
pub trait GenerateProvider: Send + Sync {
    /// Provider name for logging/debugging.
    fn name(&self) -> &str;

    /// Non-streaming text generation.
    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> Result<GenerateResponse>;
}

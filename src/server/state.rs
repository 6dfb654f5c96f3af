//! Shared, read-only services behind every request handler.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::analysis::ManipulationDetector;
use crate::explain::ExplanationGenerator;
use crate::multimodal::{ImageFetcher, MultimodalAnalyzer};
use crate::providers::{GenerateProvider, HuggingFaceClient};
use crate::report::ReportRenderer;
use crate::{PsychoGuardError, Result};

use super::config::{Config, Secrets};

/// Services built once at startup and shared by all handlers.
pub struct AppState {
    pub detector: ManipulationDetector,
    pub explainer: ExplanationGenerator,
    pub multimodal: MultimodalAnalyzer,
    /// `None` when the configured fonts could not be loaded.
    pub reporter: Option<ReportRenderer>,
}

impl AppState {
    pub fn new(
        detector: ManipulationDetector,
        explainer: ExplanationGenerator,
        multimodal: MultimodalAnalyzer,
        reporter: Option<ReportRenderer>,
    ) -> Self {
        Self {
            detector,
            explainer,
            multimodal,
            reporter,
        }
    }

    /// Build every service from configuration.
    ///
    /// The text classifier is mandatory; the LLM, vision model and report
    /// fonts degrade to "unavailable" with a warning.
    pub fn from_config(config: &Config, secrets: &Secrets) -> Result<Self> {
        let hf_key = secrets.api_key("huggingface").ok_or_else(|| {
            PsychoGuardError::Configuration(
                "no HuggingFace API key: set HF_API_KEY or [huggingface] in secrets.toml"
                    .to_string(),
            )
        })?;

        let hf = Arc::new(HuggingFaceClient::with_timeout(
            hf_key,
            &config.huggingface.base_url,
            Duration::from_secs(config.huggingface.timeout_secs),
        )?);

        let detector = ManipulationDetector::with_config(hf.clone(), config.scoring.clone());

        let multimodal = if config.vision.enabled {
            MultimodalAnalyzer::new(hf, ImageFetcher::new()?)
        } else {
            info!("vision disabled by configuration");
            MultimodalAnalyzer::unavailable()
        };

        let llm = llm_provider(config, secrets);
        if llm.is_none() {
            warn!("no Anthropic API key, explanations disabled");
        }
        let explainer = ExplanationGenerator::new(llm);

        let reporter =
            match ReportRenderer::new(&config.report.font_dir, &config.report.font_family) {
                Ok(renderer) => Some(renderer),
                Err(e) => {
                    warn!(error = %e, "report fonts unavailable, /report will fail");
                    None
                }
            };

        info!(
            model = detector.model_name(),
            vision = multimodal.is_available(),
            llm = explainer.is_enabled(),
            reports = reporter.is_some(),
            "services ready"
        );

        Ok(Self::new(detector, explainer, multimodal, reporter))
    }
}

#[cfg(feature = "anthropic")]
fn llm_provider(config: &Config, secrets: &Secrets) -> Option<Arc<dyn GenerateProvider>> {
    use crate::providers::LlmChatProvider;
    use llm::builder::LLMBackend;

    secrets.api_key("anthropic").map(|key| {
        Arc::new(
            LlmChatProvider::new(LLMBackend::Anthropic, key, "anthropic")
                .timeout_secs(config.llm.timeout_secs),
        ) as Arc<dyn GenerateProvider>
    })
}

#[cfg(not(feature = "anthropic"))]
fn llm_provider(_config: &Config, _secrets: &Secrets) -> Option<Arc<dyn GenerateProvider>> {
    None
}

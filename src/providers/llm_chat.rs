//! LLM crate wrapper implementing the GenerateProvider trait.
//!
//! [`LlmChatProvider`] stores backend configuration and builds an llm crate
//! provider per request, sending the prompt as a single user message.

use async_trait::async_trait;
use llm::LLMProvider;
use llm::builder::{LLMBackend, LLMBuilder};
use llm::chat::ChatMessage;
use tracing::instrument;

use crate::types::{GenerateOptions, GenerateResponse};
use crate::{PsychoGuardError, Result};

use super::traits::GenerateProvider;

/// Wraps llm crate provider configuration to implement our traits.
///
/// # Example
///
/// ```ignore
/// use llm::builder::LLMBackend;
/// use psychoguard::providers::LlmChatProvider;
///
/// let provider = LlmChatProvider::new(LLMBackend::Anthropic, "sk-ant-key", "anthropic");
/// ```
pub struct LlmChatProvider {
    backend: LLMBackend,
    api_key: String,
    name: String,
    /// Default timeout in seconds
    timeout_secs: u64,
}

impl LlmChatProvider {
    /// Create a new LlmChatProvider with the given backend and API key.
    ///
    /// # Arguments
    ///
    /// * `backend` - The LLM backend to use
    /// * `api_key` - API key for the backend
    /// * `name` - Human-readable name for logging/debugging (e.g., "anthropic")
    pub fn new(backend: LLMBackend, api_key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            backend,
            api_key: api_key.into(),
            name: name.into(),
            timeout_secs: 120,
        }
    }

    /// Set the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Build an llm provider configured for the given options.
    fn build_provider(&self, options: &GenerateOptions) -> Result<Box<dyn LLMProvider>> {
        let mut builder = LLMBuilder::new()
            .backend(self.backend.clone())
            .model(&options.model)
            .api_key(&self.api_key)
            .timeout_seconds(self.timeout_secs);

        if let Some(max) = options.max_tokens {
            builder = builder.max_tokens(max as u32);
        }

        builder
            .build()
            .map_err(|e| PsychoGuardError::Llm(e.to_string()))
    }
}

#[async_trait]
impl GenerateProvider for LlmChatProvider {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(name = "llm.generate", skip(self, prompt, options), fields(model = %options.model, provider = %self.name))]
    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> Result<GenerateResponse> {
        let provider = self.build_provider(options)?;
        let messages = vec![ChatMessage::user().content(prompt).build()];

        let response = provider
            .chat(&messages)
            .await
            .map_err(PsychoGuardError::from)?;

        let text = response.text().unwrap_or_default();
        if text.trim().is_empty() {
            return Err(PsychoGuardError::EmptyResponse);
        }

        Ok(GenerateResponse {
            text,
            model: Some(options.model.clone()),
        })
    }
}

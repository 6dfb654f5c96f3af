//! PsychoGuard error types

use std::time::Duration;

/// PsychoGuard error types
#[derive(Debug, thiserror::Error)]
pub enum PsychoGuardError {
    // Provider/network errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("model not found: {0}")]
    ModelNotFound(String),

    #[error("image fetch failed: {0}")]
    ImageFetch(String),

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    // Soft errors
    #[error("empty response from model")]
    EmptyResponse,

    #[error("report rendering failed: {0}")]
    Report(String),

    // Wrapped llm crate error
    #[error("LLM error: {0}")]
    Llm(String),
}

impl PsychoGuardError {
    /// Whether the upstream model is still warming up (Hugging Face answers 503).
    pub fn is_model_loading(&self) -> bool {
        matches!(self, PsychoGuardError::Api { status: 503, .. })
    }
}

impl From<llm::error::LLMError> for PsychoGuardError {
    fn from(err: llm::error::LLMError) -> Self {
        let msg = err.to_string();
        if msg.contains("rate limit") || msg.contains("429") {
            PsychoGuardError::RateLimited { retry_after: None }
        } else if msg.contains("authentication")
            || msg.contains("401")
            || msg.contains("invalid api key")
        {
            PsychoGuardError::AuthenticationFailed
        } else {
            PsychoGuardError::Llm(msg)
        }
    }
}

/// Result type alias for PsychoGuard operations
pub type Result<T> = std::result::Result<T, PsychoGuardError>;

//! Image download for multimodal analysis.

use std::time::Duration;

use reqwest::Client;
use tracing::instrument;

use crate::{PsychoGuardError, Result};

/// Network timeout for image downloads.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(6);

/// Downloads images over HTTP(S).
#[derive(Clone)]
pub struct ImageFetcher {
    http: Client,
}

impl ImageFetcher {
    /// Fetcher with the standard 6 second timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(FETCH_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PsychoGuardError::Configuration(format!("HTTP client: {e}")))?;
        Ok(Self { http })
    }

    /// GET `url` and return the body. Non-2xx responses are errors.
    #[instrument(name = "image.fetch", skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| PsychoGuardError::ImageFetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PsychoGuardError::ImageFetch(format!("{status} for url {url}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| PsychoGuardError::ImageFetch(e.to_string()))?;

        if bytes.is_empty() {
            return Err(PsychoGuardError::ImageFetch(format!("empty body for url {url}")));
        }

        Ok(bytes.to_vec())
    }
}

//! HTTP error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::PsychoGuardError;

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error kind, e.g. `bad_request`.
    pub error: String,
    pub detail: String,
}

/// Errors a handler can return.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Invalid request body (400).
    #[error("{0}")]
    BadRequest(String),

    /// Text classifier failed (500).
    #[error("classification failed: {0}")]
    Classifier(#[source] PsychoGuardError),

    /// PDF could not be produced (500).
    #[error("report generation failed: {0}")]
    Report(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Classifier(_) | ApiError::Report(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Classifier(_) => "classifier_error",
            ApiError::Report(_) => "report_error",
        }
    }
}

impl From<PsychoGuardError> for ApiError {
    fn from(err: PsychoGuardError) -> Self {
        ApiError::Classifier(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error_type = self.kind(), status = status.as_u16(), message = %self, "API error");
        } else {
            tracing::debug!(error_type = self.kind(), message = %self, "request rejected");
        }

        let body = ErrorResponse {
            error: self.kind().to_string(),
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_variants_to_status() {
        assert_eq!(
            ApiError::BadRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(PsychoGuardError::AuthenticationFailed).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ApiError::Report("fonts".into()).kind(), "report_error");
    }

    #[test]
    fn bad_request_detail_is_the_message() {
        let err = ApiError::BadRequest("Text too short.".into());
        assert_eq!(err.to_string(), "Text too short.");
    }
}

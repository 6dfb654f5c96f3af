//! HTTP JSON API.
//!
//! This module provides:
//! - Configuration and secrets loading (`config`)
//! - Shared application state built from configuration (`AppState`)
//! - The axum router and its handlers (`router`)
//! - Mapping of handler failures to HTTP responses (`ApiError`)

pub mod config;
mod error;
mod routes;
mod state;

pub use error::{ApiError, ErrorResponse};
pub use routes::{AnalyzeRequest, AnalyzeResponse, REPORT_FILENAME, router};
pub use state::AppState;

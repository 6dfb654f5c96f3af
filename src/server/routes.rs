//! HTTP routes.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::instrument;

use crate::analysis::{TEXT_MODEL, is_analyzable};
use crate::analysis::scoring::round_to;
use crate::telemetry;
use crate::types::{AnalysisResult, Explanation, Highlight, MultimodalResult, QuickScore};

use super::error::ApiError;
use super::state::AppState;

/// Attachment name of generated reports.
pub const REPORT_FILENAME: &str = "psychoguard-report.pdf";

/// Body accepted by `/analyze`, `/quick-score` and `/report`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default = "default_true")]
    pub include_explanation: bool,
    #[serde(default = "default_true")]
    pub include_highlights: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis: AnalysisResult,
    pub highlights: Vec<Highlight>,
    pub explanation: Explanation,
    pub multimodal: MultimodalResult,
    /// Seconds, two decimals.
    pub processing_time: f64,
}

/// Build the API router with permissive CORS and request tracing.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/analyze", post(analyze_handler))
        .route("/quick-score", post(quick_score_handler))
        .route("/report", post(report_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root_handler() -> impl IntoResponse {
    Json(json!({
        "status": "PsychoGuard AI running",
        "version": crate::PKG_VERSION,
    }))
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "model": TEXT_MODEL,
    }))
}

#[instrument(name = "api.analyze", skip_all)]
async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let start = Instant::now();
    let result = analyze(&state, &req, start).await;
    observe("/analyze", start, result.is_ok());
    result.map(Json)
}

async fn analyze(
    state: &AppState,
    req: &AnalyzeRequest,
    start: Instant,
) -> Result<AnalyzeResponse, ApiError> {
    if !is_analyzable(&req.text) {
        return Err(ApiError::BadRequest(
            "Text must be at least 10 characters.".to_string(),
        ));
    }

    let analysis = state.detector.analyze_text(&req.text).await?;

    let highlights = if req.include_highlights {
        state.detector.highlight_sentences(&req.text).await
    } else {
        Vec::new()
    };

    let explanation = if req.include_explanation {
        state.explainer.generate(&req.text, &analysis).await
    } else {
        Explanation::disabled()
    };

    let multimodal = match req.image_url.as_deref().filter(|u| !u.is_empty()) {
        Some(image_url) => {
            state
                .multimodal
                .analyze(image_url, req.caption.as_deref())
                .await
        }
        None => MultimodalResult::unavailable(),
    };

    Ok(AnalyzeResponse {
        analysis,
        highlights,
        explanation,
        multimodal,
        processing_time: round_to(start.elapsed().as_secs_f64(), 2),
    })
}

#[instrument(name = "api.quick_score", skip_all)]
async fn quick_score_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<QuickScore>, ApiError> {
    let start = Instant::now();
    let result = state.detector.analyze_text(&req.text).await;
    observe("/quick-score", start, result.is_ok());
    Ok(Json(QuickScore::from(result?)))
}

#[instrument(name = "api.report", skip_all)]
async fn report_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let start = Instant::now();
    let result = report(&state, &req).await;
    observe("/report", start, result.is_ok());
    let pdf = result?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{REPORT_FILENAME}\""),
            ),
        ],
        pdf,
    ))
}

async fn report(state: &AppState, req: &AnalyzeRequest) -> Result<Vec<u8>, ApiError> {
    if !is_analyzable(&req.text) {
        return Err(ApiError::BadRequest("Text too short.".to_string()));
    }

    let analysis = state.detector.analyze_text(&req.text).await?;
    let explanation = state.explainer.generate(&req.text, &analysis).await;

    let renderer = state
        .reporter
        .as_ref()
        .ok_or_else(|| ApiError::Report("report fonts are not loaded".to_string()))?;

    renderer
        .render(&req.text, &analysis, &explanation, req.url.as_deref())
        .map_err(|e| ApiError::Report(e.to_string()))
}

fn observe(endpoint: &'static str, start: Instant, ok: bool) {
    let status = if ok { "ok" } else { "error" };
    metrics::counter!(telemetry::REQUESTS_TOTAL, "endpoint" => endpoint, "status" => status)
        .increment(1);
    metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS, "endpoint" => endpoint)
        .record(start.elapsed().as_secs_f64());
}

//! Telemetry metric name constants.
//!
//! Centralised metric names for psychoguard operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `psychoguard_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `endpoint`: HTTP route (e.g. "/analyze", "/report")
//! - `mode`: classification mode: "multi_label" or "single_label"
//! - `status`: outcome: "ok" or "error"
//! - `component`: degraded component: "highlight", "explanation", "multimodal"

/// Total HTTP requests handled.
///
/// Labels: `endpoint`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "psychoguard_requests_total";

/// Request duration in seconds.
///
/// Labels: `endpoint`.
pub const REQUEST_DURATION_SECONDS: &str = "psychoguard_request_duration_seconds";

/// Total zero-shot text classifier invocations.
///
/// Labels: `mode`, `status`.
pub const CLASSIFIER_CALLS_TOTAL: &str = "psychoguard_classifier_calls_total";

/// Total degraded-but-successful outcomes.
///
/// Labels: `component`.
pub const DEGRADED_TOTAL: &str = "psychoguard_degraded_total";

/// Record one degraded outcome for `component`.
pub fn record_degraded(component: &'static str) {
    metrics::counter!(DEGRADED_TOTAL, "component" => component).increment(1);
}

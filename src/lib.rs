//! PsychoGuard - psychological manipulation detector
//!
//! Scores text for six manipulation tactics with a zero-shot NLI classifier,
//! highlights the most manipulative sentences, explains the findings with an
//! LLM, checks images against their captions, and renders PDF reports. The
//! `server` feature exposes all of it as an HTTP JSON API (`psychoguardd`).
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use psychoguard::analysis::ManipulationDetector;
//! use psychoguard::providers::HuggingFaceClient;
//!
//! #[tokio::main]
//! async fn main() -> psychoguard::Result<()> {
//!     let classifier = Arc::new(HuggingFaceClient::new("hf_your_key")?);
//!     let detector = ManipulationDetector::new(classifier);
//!
//!     let analysis = detector
//!         .analyze_text("Act now before it's too late! Everyone is buying this!")
//!         .await?;
//!
//!     println!("{} ({})", analysis.overall_score, analysis.severity);
//!     for tactic in &analysis.top_tactics {
//!         println!("  {tactic}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod error;
pub mod explain;
pub mod multimodal;
pub mod providers;
pub mod report;
#[cfg(feature = "server")]
pub mod server;
pub mod telemetry;
pub mod types;
pub mod version;

// Re-export main types at crate root
pub use error::{PsychoGuardError, Result};
pub use version::{BUILD, BuildInfo, PKG_VERSION, version_string};

pub use analysis::ManipulationDetector;
pub use explain::ExplanationGenerator;
pub use multimodal::MultimodalAnalyzer;
pub use report::{ReportLayout, ReportRenderer};

// Re-export all types
pub use types::{
    AnalysisResult, ClassifyMode, ClassifyResult, Explanation, GenerateOptions, GenerateResponse,
    Highlight, ImageClassifyResult, LabelScore, MultimodalResult, QuickScore, Section, Severity,
    Tactic, Verdict,
};

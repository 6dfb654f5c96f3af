//! Text analysis: chunked tactic scoring, aggregation and sentence highlighting.

pub mod detector;
pub mod highlight;
pub mod scoring;

pub use detector::{
    MIN_TEXT_CHARS, ManipulationDetector, TEXT_MODEL, chunk_text, is_analyzable,
};
pub use highlight::split_sentences;
pub use scoring::ScoringConfig;

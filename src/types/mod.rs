//! Public types for the PsychoGuard API.

mod analysis;
mod explanation;
mod generate;
mod inference;
mod multimodal;
mod tactic;

pub use analysis::{AnalysisResult, Highlight, QuickScore, Severity};
pub(crate) use analysis::{tactic_colors, tactic_descriptions};
pub use explanation::{Explanation, Section};
pub use generate::{GenerateOptions, GenerateResponse};
pub use inference::{ClassifyMode, ClassifyResult, ImageClassifyResult, LabelScore};
pub use multimodal::{MultimodalResult, Verdict};
pub use tactic::Tactic;

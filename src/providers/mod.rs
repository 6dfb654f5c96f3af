//! Provider implementations for the inference capabilities.
//!
//! Classification (text and image) is served by the HuggingFace Inference
//! API; text generation is handled by the llm crate.

pub mod huggingface;
pub mod llm_chat;
pub mod traits;

pub use huggingface::HuggingFaceClient;
pub use llm_chat::LlmChatProvider;
pub use traits::{ClassifyProvider, GenerateProvider, ImageClassifyProvider};

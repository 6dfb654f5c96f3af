//! In-memory providers shared by the integration tests.
#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use psychoguard::providers::{ClassifyProvider, GenerateProvider, ImageClassifyProvider};
use psychoguard::types::{
    ClassifyMode, ClassifyResult, GenerateOptions, GenerateResponse, ImageClassifyResult,
    LabelScore, Tactic,
};
use psychoguard::{PsychoGuardError, Result};

pub const MANIPULATIVE_TEXT: &str =
    "Act now before it's too late! Everyone is buying this, don't be left behind!";

// ============================================================================
// Text classifier
// ============================================================================

/// Classifier with fixed answers per mode.
///
/// Multi-label calls return `multi` (one score per tactic, label order).
/// Single-label calls return `single_label` with `single_score` on top and
/// the remainder spread over the other labels. Texts containing `fail_on`
/// produce an error.
pub struct ScriptedClassifier {
    pub multi: [f32; 6],
    pub single_label: Tactic,
    pub single_score: f32,
    pub fail_on: Option<&'static str>,
    calls: AtomicUsize,
    seen: Mutex<Vec<(String, ClassifyMode)>>,
    models: Mutex<Vec<String>>,
}

impl ScriptedClassifier {
    pub fn new(multi: [f32; 6]) -> Self {
        Self {
            multi,
            single_label: Tactic::FearUrgency,
            single_score: 0.5,
            fail_on: None,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
            models: Mutex::new(Vec::new()),
        }
    }

    pub fn single(mut self, tactic: Tactic, score: f32) -> Self {
        self.single_label = tactic;
        self.single_score = score;
        self
    }

    pub fn fail_on(mut self, needle: &'static str) -> Self {
        self.fail_on = Some(needle);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<(String, ClassifyMode)> {
        self.seen.lock().unwrap().clone()
    }

    /// Model ID passed on each call.
    pub fn models(&self) -> Vec<String> {
        self.models.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClassifyProvider for ScriptedClassifier {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn classify_zero_shot(
        &self,
        text: &str,
        labels: &[&str],
        mode: ClassifyMode,
        model: &str,
    ) -> Result<ClassifyResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.models.lock().unwrap().push(model.to_string());
        self.seen.lock().unwrap().push((text.to_string(), mode));

        if let Some(needle) = self.fail_on
            && text.contains(needle)
        {
            return Err(PsychoGuardError::Api {
                status: 500,
                message: "scripted failure".to_string(),
            });
        }

        let scores: Vec<f32> = match mode {
            ClassifyMode::MultiLabel => self.multi.to_vec(),
            ClassifyMode::SingleLabel => {
                let rest = (1.0 - self.single_score) / (labels.len() as f32 - 1.0);
                labels
                    .iter()
                    .map(|l| {
                        if *l == self.single_label.label() {
                            self.single_score
                        } else {
                            rest
                        }
                    })
                    .collect()
            }
        };

        Ok(ClassifyResult::from_pairs(
            labels.iter().map(|l| l.to_string()).collect(),
            scores,
        ))
    }
}

/// Classifier that always fails.
pub struct FailingClassifier;

#[async_trait]
impl ClassifyProvider for FailingClassifier {
    fn name(&self) -> &str {
        "failing"
    }

    async fn classify_zero_shot(
        &self,
        _text: &str,
        _labels: &[&str],
        _mode: ClassifyMode,
        _model: &str,
    ) -> Result<ClassifyResult> {
        Err(PsychoGuardError::AuthenticationFailed)
    }
}

// ============================================================================
// Text generation
// ============================================================================

/// Generator returning a fixed reply (or error) and recording prompts.
pub struct MockGenerator {
    reply: std::result::Result<String, String>,
    prompts: Mutex<Vec<(String, GenerateOptions)>>,
}

impl MockGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<(String, GenerateOptions)> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerateProvider for MockGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> Result<GenerateResponse> {
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), options.clone()));
        match &self.reply {
            Ok(text) => Ok(GenerateResponse {
                text: text.clone(),
                model: Some(options.model.clone()),
            }),
            Err(message) => Err(PsychoGuardError::Llm(message.clone())),
        }
    }
}

// ============================================================================
// Vision
// ============================================================================

/// Vision model assigning `probs[i]` to the i-th candidate label.
pub struct MockVision {
    pub probs: Vec<f32>,
    seen: Mutex<Vec<(usize, Vec<String>)>>,
}

impl MockVision {
    pub fn new(probs: Vec<f32>) -> Self {
        Self {
            probs,
            seen: Mutex::new(Vec::new()),
        }
    }

    /// `(image byte length, labels)` per call.
    pub fn seen(&self) -> Vec<(usize, Vec<String>)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageClassifyProvider for MockVision {
    fn name(&self) -> &str {
        "mock-vision"
    }

    async fn classify_image(
        &self,
        image: &[u8],
        labels: &[&str],
        _model: &str,
    ) -> Result<ImageClassifyResult> {
        self.seen.lock().unwrap().push((
            image.len(),
            labels.iter().map(|l| l.to_string()).collect(),
        ));
        Ok(ImageClassifyResult {
            scores: labels
                .iter()
                .zip(&self.probs)
                .map(|(label, score)| LabelScore {
                    label: label.to_string(),
                    score: *score,
                })
                .collect(),
        })
    }
}

//! Inference result types for classification capabilities

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// How candidate labels relate in zero-shot text classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifyMode {
    /// Labels scored independently; scores may sum above 1.
    MultiLabel,
    /// Labels mutually exclusive; scores form a distribution.
    SingleLabel,
}

impl ClassifyMode {
    pub fn is_multi_label(self) -> bool {
        matches!(self, ClassifyMode::MultiLabel)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ClassifyMode::MultiLabel => "multi_label",
            ClassifyMode::SingleLabel => "single_label",
        }
    }
}

/// Zero-shot text classification result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassifyResult {
    /// Score per candidate label.
    pub scores: HashMap<String, f32>,
    /// Highest-scoring label.
    pub top_label: String,
    /// Score of `top_label`.
    pub confidence: f32,
}

impl ClassifyResult {
    /// Build from parallel label/score lists; the first maximum wins on ties.
    pub fn from_pairs(labels: Vec<String>, scores: Vec<f32>) -> Self {
        let mut top_label = String::new();
        let mut confidence = f32::NEG_INFINITY;
        let mut map = HashMap::with_capacity(labels.len());

        for (label, score) in labels.into_iter().zip(scores) {
            if score > confidence {
                confidence = score;
                top_label = label.clone();
            }
            map.insert(label, score);
        }

        if map.is_empty() {
            confidence = 0.0;
        }

        Self {
            scores: map,
            top_label,
            confidence,
        }
    }

    /// Score for a label, 0.0 if the model did not return it.
    pub fn score(&self, label: &str) -> f32 {
        self.scores.get(label).copied().unwrap_or(0.0)
    }
}

/// One label's probability from an image/text similarity model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f32,
}

/// Zero-shot image classification result (softmax over candidate texts).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageClassifyResult {
    pub scores: Vec<LabelScore>,
}

impl ImageClassifyResult {
    pub fn score(&self, label: &str) -> Option<f32> {
        self.scores
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.score)
    }
}

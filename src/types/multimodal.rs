//! Image/caption analysis result types

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Verdict for caption mode, from the mismatch percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Verdict {
    #[serde(rename = "ALIGNED")]
    Aligned,
    #[serde(rename = "MODERATE")]
    Moderate,
    #[serde(rename = "HIGH MISMATCH")]
    HighMismatch,
}

impl Verdict {
    pub fn from_mismatch(mismatch_pct: f64) -> Self {
        if mismatch_pct > 60.0 {
            Verdict::HighMismatch
        } else if mismatch_pct > 35.0 {
            Verdict::Moderate
        } else {
            Verdict::Aligned
        }
    }
}

/// Outcome of the optional image analysis.
///
/// Serialized flat with an `available` flag, e.g.
/// `{"available": true, "match_probability": 80.2, ...}`.
#[derive(Debug, Clone, PartialEq)]
pub enum MultimodalResult {
    /// Capability missing, nothing supplied, or the attempt failed.
    Unavailable { error: Option<String> },
    /// Image checked against a caption.
    Caption {
        match_probability: f64,
        mismatch_score: f64,
        verdict: Verdict,
    },
    /// Image scored against fixed clickbait prompts.
    Clickbait {
        clickbait_score: f64,
        label_scores: BTreeMap<String, f64>,
    },
}

impl MultimodalResult {
    pub fn unavailable() -> Self {
        MultimodalResult::Unavailable { error: None }
    }

    pub fn failed(error: impl ToString) -> Self {
        MultimodalResult::Unavailable {
            error: Some(error.to_string()),
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, MultimodalResult::Unavailable { .. })
    }
}

impl Default for MultimodalResult {
    fn default() -> Self {
        Self::unavailable()
    }
}

impl Serialize for MultimodalResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MultimodalResult::Unavailable { error } => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("available", &false)?;
                if let Some(error) = error {
                    map.serialize_entry("error", error)?;
                }
                map.end()
            }
            MultimodalResult::Caption {
                match_probability,
                mismatch_score,
                verdict,
            } => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry("available", &true)?;
                map.serialize_entry("match_probability", match_probability)?;
                map.serialize_entry("mismatch_score", mismatch_score)?;
                map.serialize_entry("verdict", verdict)?;
                map.end()
            }
            MultimodalResult::Clickbait {
                clickbait_score,
                label_scores,
            } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("available", &true)?;
                map.serialize_entry("clickbait_score", clickbait_score)?;
                map.serialize_entry("label_scores", label_scores)?;
                map.end()
            }
        }
    }
}

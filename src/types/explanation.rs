//! LLM explanation types

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed headings the LLM is asked to produce, in prompt order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Section {
    #[serde(rename = "SUMMARY")]
    Summary,
    #[serde(rename = "KEY TACTICS")]
    KeyTactics,
    #[serde(rename = "PSYCHOLOGICAL MECHANISM")]
    PsychologicalMechanism,
    #[serde(rename = "WHAT TO WATCH OUT FOR")]
    WhatToWatchOutFor,
    #[serde(rename = "VERDICT")]
    Verdict,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Summary,
        Section::KeyTactics,
        Section::PsychologicalMechanism,
        Section::WhatToWatchOutFor,
        Section::Verdict,
    ];

    pub fn heading(self) -> &'static str {
        match self {
            Section::Summary => "SUMMARY",
            Section::KeyTactics => "KEY TACTICS",
            Section::PsychologicalMechanism => "PSYCHOLOGICAL MECHANISM",
            Section::WhatToWatchOutFor => "WHAT TO WATCH OUT FOR",
            Section::Verdict => "VERDICT",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.heading())
    }
}

/// Human-readable explanation of an analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub success: bool,
    pub full_explanation: String,
    /// Only headings found in the reply are present.
    pub sections: BTreeMap<Section, String>,
}

impl Explanation {
    /// Explanation that carries only a message (disabled or failed).
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            success: false,
            full_explanation: message.into(),
            sections: BTreeMap::new(),
        }
    }

    /// Placeholder used when the caller opted out of explanations.
    pub fn disabled() -> Self {
        Self::unavailable("LLM disabled")
    }
}

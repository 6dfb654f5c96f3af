//! Manipulation tactic reference data.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the six manipulation tactics the classifier scores.
///
/// The display name doubles as the zero-shot candidate label and as the JSON
/// key in score maps. Variant order is the fixed label-set order; derived
/// `Ord` follows it, so `BTreeMap<Tactic, _>` iterates in label order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tactic {
    #[serde(rename = "Fear & Urgency")]
    FearUrgency,
    #[serde(rename = "False Social Proof")]
    FalseSocialProof,
    #[serde(rename = "Identity Attack")]
    IdentityAttack,
    #[serde(rename = "Emotional Hijacking")]
    EmotionalHijacking,
    #[serde(rename = "Scarcity Illusion")]
    ScarcityIllusion,
    #[serde(rename = "Gaslighting")]
    Gaslighting,
}

impl Tactic {
    /// All tactics in label-set order.
    pub const ALL: [Tactic; 6] = [
        Tactic::FearUrgency,
        Tactic::FalseSocialProof,
        Tactic::IdentityAttack,
        Tactic::EmotionalHijacking,
        Tactic::ScarcityIllusion,
        Tactic::Gaslighting,
    ];

    /// Candidate label sent to the classifier.
    pub fn label(self) -> &'static str {
        match self {
            Tactic::FearUrgency => "Fear & Urgency",
            Tactic::FalseSocialProof => "False Social Proof",
            Tactic::IdentityAttack => "Identity Attack",
            Tactic::EmotionalHijacking => "Emotional Hijacking",
            Tactic::ScarcityIllusion => "Scarcity Illusion",
            Tactic::Gaslighting => "Gaslighting",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Tactic::FearUrgency => "Creates panic or time pressure to bypass rational thinking",
            Tactic::FalseSocialProof => "Uses fake or exaggerated popularity to influence behavior",
            Tactic::IdentityAttack => "Targets personal identity to shame or manipulate",
            Tactic::EmotionalHijacking => "Overloads emotions to override logical decision-making",
            Tactic::ScarcityIllusion => {
                "Fabricates limited availability to trigger impulsive action"
            }
            Tactic::Gaslighting => "Contradicts reality to make the reader doubt their perception",
        }
    }

    /// Display color as a hex token.
    pub fn color(self) -> &'static str {
        match self {
            Tactic::FearUrgency => "#ff4d6a",
            Tactic::FalseSocialProof => "#ffb547",
            Tactic::IdentityAttack => "#a78bfa",
            Tactic::EmotionalHijacking => "#f472b6",
            Tactic::ScarcityIllusion => "#38bdf8",
            Tactic::Gaslighting => "#fb923c",
        }
    }

    /// Look up a tactic by its classifier label (exact match).
    pub fn from_label(label: &str) -> Option<Tactic> {
        Tactic::ALL.into_iter().find(|t| t.label() == label)
    }

    /// Candidate labels in label-set order.
    pub fn labels() -> [&'static str; 6] {
        Tactic::ALL.map(Tactic::label)
    }
}

impl fmt::Display for Tactic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

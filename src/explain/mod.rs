//! LLM-backed explanation of an analysis.
//!
//! The generator never fails: a missing credential or a failed LLM call is
//! reported inside the returned [`Explanation`] with `success = false`.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{instrument, warn};

use crate::providers::GenerateProvider;
use crate::telemetry;
use crate::PsychoGuardError;
use crate::types::{AnalysisResult, Explanation, GenerateOptions, Section};

/// Model used for explanations.
pub const LLM_MODEL: &str = "claude-sonnet-4-6";

/// Token bound on the reply.
pub const MAX_REPLY_TOKENS: usize = 650;

/// Characters of the analyzed text embedded in the prompt.
pub const PROMPT_TEXT_CHARS: usize = 1500;

/// Message returned when no LLM credential is configured.
pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "Set ANTHROPIC_API_KEY environment variable to enable LLM analysis.";

/// Turns an analysis into a sectioned, human-readable explanation.
pub struct ExplanationGenerator {
    provider: Option<Arc<dyn GenerateProvider>>,
    model: String,
}

impl ExplanationGenerator {
    /// `None` disables the LLM; every call then returns the credential hint.
    pub fn new(provider: Option<Arc<dyn GenerateProvider>>) -> Self {
        Self {
            provider,
            model: LLM_MODEL.to_string(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    #[instrument(name = "explain.generate", skip_all, fields(score = analysis.overall_score))]
    pub async fn generate(&self, text: &str, analysis: &AnalysisResult) -> Explanation {
        let Some(provider) = &self.provider else {
            return Explanation::unavailable(MISSING_CREDENTIAL_MESSAGE);
        };

        let prompt = build_prompt(text, analysis);
        let options = GenerateOptions::new(&self.model).max_tokens(MAX_REPLY_TOKENS);

        match provider.generate(&prompt, &options).await {
            Ok(response) => Explanation {
                success: true,
                sections: parse_sections(&response.text),
                full_explanation: response.text,
            },
            Err(e) => {
                warn!(error = %e, provider = provider.name(), "explanation failed");
                telemetry::record_degraded("explanation");
                let message = match e {
                    PsychoGuardError::Llm(message) => message,
                    other => other.to_string(),
                };
                Explanation::unavailable(format!("LLM error: {message}"))
            }
        }
    }
}

/// Build the deterministic explanation prompt.
pub fn build_prompt(text: &str, analysis: &AnalysisResult) -> String {
    let tactic_summary = if analysis.top_tactics.is_empty() {
        "none".to_string()
    } else {
        analysis
            .top_tactics
            .iter()
            .map(|t| t.label())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let excerpt: String = text.chars().take(PROMPT_TEXT_CHARS).collect();
    let headings = Section::ALL
        .iter()
        .map(|s| s.heading())
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a media-literacy expert specialising in psychological manipulation.\n\
         \n\
         The automated transformer scored this text {score:.1}/100 for manipulation.\n\
         Top tactics detected: {tactic_summary}\n\
         \n\
         TEXT:\n\
         \"\"\"{excerpt}\"\"\"\n\
         \n\
         Write a structured analysis with exactly these 5 headings (use them verbatim):\n\
         {headings}\n\
         \n\
         Rules:\n\
         - Cite actual phrases from the text as evidence.\n\
         - Be direct and specific.\n\
         - Total response under 420 words.\n",
        score = analysis.overall_score,
    )
}

/// Split an LLM reply into its headed sections.
///
/// A line opens a section when its trimmed, upper-cased form starts with a
/// heading (first heading in [`Section::ALL`] order wins). Following
/// non-empty lines are joined with single spaces. Lines before the first
/// heading are dropped.
pub fn parse_sections(reply: &str) -> BTreeMap<Section, String> {
    let mut sections = BTreeMap::new();
    let mut current: Option<Section> = None;
    let mut body: Vec<&str> = Vec::new();

    for line in reply.lines() {
        let stripped = line.trim();
        let upper = stripped.to_uppercase();

        if let Some(heading) = Section::ALL
            .into_iter()
            .find(|s| upper.starts_with(s.heading()))
        {
            if let Some(section) = current {
                sections.insert(section, body.join(" ").trim().to_string());
            }
            current = Some(heading);
            body.clear();
        } else if current.is_some() && !stripped.is_empty() {
            body.push(stripped);
        }
    }

    if let Some(section) = current {
        sections.insert(section, body.join(" ").trim().to_string());
    }

    sections
}

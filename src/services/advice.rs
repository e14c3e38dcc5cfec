//! Advice requests with a fixed fallback.
//!
//! The remote call hands back a `Result`; [`AdviceOutcome::resolve`] decides
//! what the user sees. Any failure yields the fallback text for the kind of
//! request, plus a warning unless the user simply did not provide a key.

use reqwest::Client;
use tracing::{info, warn};

use crate::config::AiConfig;
use crate::models::advice::COACH_SYSTEM_PROMPT;
use crate::models::{AdviceKind, SpendingProfile};
use crate::services::ai_client::{complete, AdviceError, ChatRequest};

/// What the page shows after an advice request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdviceOutcome {
    pub kind: AdviceKind,
    pub text: String,
    /// Non-fatal notice shown above the text when the remote call failed.
    pub warning: Option<String>,
    /// `true` when `text` came from the model rather than the fallback.
    /// Shown as the AI/mock badge.
    pub from_ai: bool,
}

impl AdviceOutcome {
    pub fn resolve(kind: AdviceKind, result: Result<String, AdviceError>) -> Self {
        match result {
            Ok(text) => Self {
                kind,
                text,
                warning: None,
                from_ai: true,
            },
            Err(AdviceError::MissingApiKey) => {
                info!(?kind, "No API key provided, using fallback advice");
                Self::fallback(kind, None)
            }
            Err(e) => {
                warn!(?kind, error = %e, "Advice request failed, using fallback advice");
                let warning = format!(
                    "AI quota or API issue detected ({}). Showing {} instead.",
                    e.reason(),
                    kind.fallback_label()
                );
                Self::fallback(kind, Some(warning))
            }
        }
    }

    fn fallback(kind: AdviceKind, warning: Option<String>) -> Self {
        Self {
            kind,
            text: kind.fallback_text().to_string(),
            warning,
            from_ai: false,
        }
    }

    /// Text split on newlines, for rendering as separate lines.
    pub fn lines(&self) -> Vec<&str> {
        self.text.lines().collect()
    }
}

pub fn general_prompt(profile: &SpendingProfile) -> String {
    format!(
        "{}\n\n\
         Here is the user's spending profile:\n\n\
         {}\n\n\
         Give 3 short, actionable tips specifically tailored to their top spending categories and subscriptions.\n\
         Each tip should be no more than 2 sentences.\n\
         Make the advice practical, concise, and easy to implement.",
        COACH_SYSTEM_PROMPT, profile
    )
}

pub fn question_prompt(question: &str) -> String {
    format!(
        "{}\n\
         Answer the user's question concisely and give 1-2 actionable tips, each in 1-2 sentences.\n\n\
         User question: {}",
        COACH_SYSTEM_PROMPT,
        question.trim()
    )
}

/// Ask for tips tailored to a spending profile.
pub async fn request_advice(
    client: &Client,
    ai: &AiConfig,
    api_key: Option<&str>,
    profile: &SpendingProfile,
) -> AdviceOutcome {
    let kind = AdviceKind::General;
    let request = ChatRequest {
        system: COACH_SYSTEM_PROMPT,
        prompt: general_prompt(profile),
        max_tokens: kind.max_tokens(),
    };
    AdviceOutcome::resolve(kind, complete(client, ai, api_key, &request).await)
}

/// Ask a free-text question.
pub async fn answer_question(
    client: &Client,
    ai: &AiConfig,
    api_key: Option<&str>,
    question: &str,
) -> AdviceOutcome {
    let kind = AdviceKind::Question;
    let request = ChatRequest {
        system: COACH_SYSTEM_PROMPT,
        prompt: question_prompt(question),
        max_tokens: kind.max_tokens(),
    };
    AdviceOutcome::resolve(kind, complete(client, ai, api_key, &request).await)
}

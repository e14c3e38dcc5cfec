use std::str::FromStr;

/// Remote chat providers an advice request can be sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AiProvider {
    #[default]
    OpenAi,
    Anthropic,
    Ollama,
}

impl AiProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Ollama => "ollama",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::Ollama => "Ollama (Local)",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com/v1",
            Self::Anthropic => "https://api.anthropic.com",
            Self::Ollama => "http://localhost:11434",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4o-mini",
            Self::Anthropic => "claude-3-5-haiku-latest",
            Self::Ollama => "llama3.2",
        }
    }

    pub fn requires_api_key(&self) -> bool {
        match self {
            Self::OpenAi | Self::Anthropic => true,
            Self::Ollama => false,
        }
    }
}

impl FromStr for AiProvider {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "anthropic" => Ok(Self::Anthropic),
            "ollama" => Ok(Self::Ollama),
            _ => Err(()),
        }
    }
}

pub const COACH_SYSTEM_PROMPT: &str = "You are a calm, supportive financial coach.";

pub const GENERAL_ADVICE_FALLBACK: &str = "• Review your top spending category and find 1–2 ways to reduce it.
• Consider pausing or canceling underused subscriptions.
• Set up automated savings based on your usual spending patterns.";

pub const QUESTION_FALLBACK: &str = "Start by identifying one recurring expense to reduce, \
then redirect that money into savings automatically.";

/// The two kinds of advice a user can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdviceKind {
    /// Tips tailored to the uploaded spending profile.
    General,
    /// An answer to a free-text question.
    Question,
}

impl AdviceKind {
    pub fn max_tokens(&self) -> u32 {
        match self {
            Self::General => 300,
            Self::Question => 200,
        }
    }

    pub fn fallback_text(&self) -> &'static str {
        match self {
            Self::General => GENERAL_ADVICE_FALLBACK,
            Self::Question => QUESTION_FALLBACK,
        }
    }

    /// What the page shows instead, named in the warning.
    pub fn fallback_label(&self) -> &'static str {
        match self {
            Self::General => "mock AI insights",
            Self::Question => "mock response",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::General => "block-advice",
            Self::Question => "block-answer",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_round_trip_names() {
        for provider in [AiProvider::OpenAi, AiProvider::Anthropic, AiProvider::Ollama] {
            assert_eq!(AiProvider::from_str(provider.as_str()), Ok(provider));
        }
        assert_eq!(AiProvider::from_str(" OpenAI "), Ok(AiProvider::OpenAi));
        assert!(AiProvider::from_str("gemini").is_err());
    }

    #[test]
    fn test_only_ollama_runs_without_key() {
        assert!(AiProvider::OpenAi.requires_api_key());
        assert!(AiProvider::Anthropic.requires_api_key());
        assert!(!AiProvider::Ollama.requires_api_key());
    }

    #[test]
    fn test_kind_limits_and_fallbacks() {
        assert_eq!(AdviceKind::General.max_tokens(), 300);
        assert_eq!(AdviceKind::Question.max_tokens(), 200);
        assert!(AdviceKind::General
            .fallback_text()
            .contains("underused subscriptions"));
        assert_eq!(
            AdviceKind::Question.fallback_text(),
            "Start by identifying one recurring expense to reduce, then redirect that money into savings automatically."
        );
    }
}

use crate::config::AiConfig;
use crate::error::{AppError, AppResult};
use crate::models::AiProvider;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Why a completion request produced no usable text.
#[derive(Error, Debug)]
pub enum AdviceError {
    #[error("no API key provided")]
    MissingApiKey,

    #[error("network error: {0}")]
    Network(String),

    #[error("authentication failed ({0})")]
    Unauthorized(StatusCode),

    #[error("rate limit or quota exceeded")]
    RateLimited,

    #[error("API returned {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("unreadable response: {0}")]
    InvalidResponse(String),

    #[error("empty response")]
    EmptyResponse,
}

impl AdviceError {
    /// Short reason suitable for showing to the user. Never includes response bodies.
    pub fn reason(&self) -> String {
        match self {
            Self::MissingApiKey => "no API key".to_string(),
            Self::Network(_) => "network error".to_string(),
            Self::Unauthorized(_) => "authentication failed".to_string(),
            Self::RateLimited => "rate limit or quota exceeded".to_string(),
            Self::Api { status, .. } => format!("API error {}", status.as_u16()),
            Self::InvalidResponse(_) => "unreadable response".to_string(),
            Self::EmptyResponse => "empty response".to_string(),
        }
    }
}

/// A single-turn chat completion.
#[derive(Debug, Clone)]
pub struct ChatRequest<'a> {
    pub system: &'a str,
    pub prompt: String,
    pub max_tokens: u32,
}

/// Create an HTTP client with the configured timeout
pub fn create_client(timeout: Duration) -> AppResult<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))
}

/// Send one completion request to the configured provider. Single attempt, no retry.
pub async fn complete(
    client: &Client,
    ai: &AiConfig,
    api_key: Option<&str>,
    request: &ChatRequest<'_>,
) -> Result<String, AdviceError> {
    let api_key = api_key.map(str::trim).filter(|k| !k.is_empty());
    if ai.provider.requires_api_key() && api_key.is_none() {
        return Err(AdviceError::MissingApiKey);
    }
    let api_key = api_key.unwrap_or_default();

    let text = match ai.provider {
        AiProvider::OpenAi => complete_with_openai_compatible(client, ai, api_key, request).await?,
        AiProvider::Anthropic => complete_with_anthropic(client, ai, api_key, request).await?,
        AiProvider::Ollama => complete_with_ollama(client, ai, request).await?,
    };

    let text = text.trim();
    if text.is_empty() {
        return Err(AdviceError::EmptyResponse);
    }
    Ok(text.to_string())
}

async fn complete_with_openai_compatible(
    client: &Client,
    ai: &AiConfig,
    api_key: &str,
    request: &ChatRequest<'_>,
) -> Result<String, AdviceError> {
    let url = format!("{}/chat/completions", ai.base_url.trim_end_matches('/'));

    #[derive(Serialize)]
    struct Message<'a> {
        role: &'a str,
        content: &'a str,
    }

    #[derive(Serialize)]
    struct OpenAiRequest<'a> {
        model: &'a str,
        messages: Vec<Message<'a>>,
        max_tokens: u32,
    }

    #[derive(Deserialize)]
    struct OpenAiResponse {
        choices: Vec<Choice>,
    }

    #[derive(Deserialize)]
    struct Choice {
        message: ChoiceMessage,
    }

    #[derive(Deserialize)]
    struct ChoiceMessage {
        content: Option<String>,
    }

    let body = OpenAiRequest {
        model: &ai.model,
        messages: vec![
            Message {
                role: "system",
                content: request.system,
            },
            Message {
                role: "user",
                content: &request.prompt,
            },
        ],
        max_tokens: request.max_tokens,
    };

    debug!(model = %ai.model, max_tokens = request.max_tokens, "Sending completion request to OpenAI-compatible API");

    let response = client
        .post(&url)
        .bearer_auth(api_key)
        .json(&body)
        .send()
        .await
        .map_err(request_error)?;

    let response = check_status(response).await?;

    let parsed: OpenAiResponse = response
        .json()
        .await
        .map_err(|e| AdviceError::InvalidResponse(e.to_string()))?;

    Ok(parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .unwrap_or_default())
}

async fn complete_with_anthropic(
    client: &Client,
    ai: &AiConfig,
    api_key: &str,
    request: &ChatRequest<'_>,
) -> Result<String, AdviceError> {
    let url = format!("{}/v1/messages", ai.base_url.trim_end_matches('/'));

    #[derive(Serialize)]
    struct Message<'a> {
        role: &'a str,
        content: &'a str,
    }

    #[derive(Serialize)]
    struct AnthropicRequest<'a> {
        model: &'a str,
        max_tokens: u32,
        system: &'a str,
        messages: Vec<Message<'a>>,
    }

    #[derive(Deserialize)]
    struct AnthropicResponse {
        content: Vec<ContentBlock>,
    }

    #[derive(Deserialize)]
    struct ContentBlock {
        text: Option<String>,
    }

    let body = AnthropicRequest {
        model: &ai.model,
        max_tokens: request.max_tokens,
        system: request.system,
        messages: vec![Message {
            role: "user",
            content: &request.prompt,
        }],
    };

    debug!(model = %ai.model, max_tokens = request.max_tokens, "Sending completion request to Anthropic");

    let response = client
        .post(&url)
        .header("x-api-key", api_key)
        .header("anthropic-version", "2023-06-01")
        .json(&body)
        .send()
        .await
        .map_err(request_error)?;

    let response = check_status(response).await?;

    let parsed: AnthropicResponse = response
        .json()
        .await
        .map_err(|e| AdviceError::InvalidResponse(e.to_string()))?;

    Ok(parsed
        .content
        .into_iter()
        .filter_map(|block| block.text)
        .collect::<Vec<_>>()
        .join(""))
}

async fn complete_with_ollama(
    client: &Client,
    ai: &AiConfig,
    request: &ChatRequest<'_>,
) -> Result<String, AdviceError> {
    let url = format!("{}/api/generate", ai.base_url.trim_end_matches('/'));

    #[derive(Serialize)]
    struct OllamaOptions {
        num_predict: u32,
    }

    #[derive(Serialize)]
    struct OllamaRequest<'a> {
        model: &'a str,
        prompt: &'a str,
        system: &'a str,
        stream: bool,
        options: OllamaOptions,
    }

    #[derive(Deserialize)]
    struct OllamaResponse {
        response: String,
    }

    let body = OllamaRequest {
        model: &ai.model,
        prompt: &request.prompt,
        system: request.system,
        stream: false,
        options: OllamaOptions {
            num_predict: request.max_tokens,
        },
    };

    debug!(model = %ai.model, max_tokens = request.max_tokens, "Sending completion request to Ollama");

    let response = client
        .post(&url)
        .json(&body)
        .send()
        .await
        .map_err(request_error)?;

    let response = check_status(response).await?;

    let parsed: OllamaResponse = response
        .json()
        .await
        .map_err(|e| AdviceError::InvalidResponse(e.to_string()))?;

    Ok(parsed.response)
}

fn request_error(e: reqwest::Error) -> AdviceError {
    if e.is_timeout() {
        AdviceError::Network("request timed out".to_string())
    } else {
        AdviceError::Network(e.to_string())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, AdviceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(classify_status(status, body))
}

fn classify_status(status: StatusCode, body: String) -> AdviceError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AdviceError::Unauthorized(status),
        StatusCode::TOO_MANY_REQUESTS => AdviceError::RateLimited,
        _ => AdviceError::Api { status, body },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_status() {
        assert!(matches!(
            classify_status(StatusCode::UNAUTHORIZED, String::new()),
            AdviceError::Unauthorized(StatusCode::UNAUTHORIZED)
        ));
        assert!(matches!(
            classify_status(StatusCode::FORBIDDEN, String::new()),
            AdviceError::Unauthorized(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::TOO_MANY_REQUESTS, "quota".into()),
            AdviceError::RateLimited
        ));
        match classify_status(StatusCode::BAD_GATEWAY, "upstream".into()) {
            AdviceError::Api { status, body } => {
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert_eq!(body, "upstream");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_reason_hides_details() {
        let err = AdviceError::Api {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "secret internals".into(),
        };
        assert_eq!(err.reason(), "API error 500");
        assert_eq!(
            AdviceError::Network("dns failure".into()).reason(),
            "network error"
        );
    }

    #[tokio::test]
    async fn test_missing_api_key_short_circuits() {
        let client = create_client(Duration::from_secs(1)).unwrap();
        let ai = AiConfig {
            base_url: "http://127.0.0.1:1".into(),
            ..AiConfig::default()
        };
        let request = ChatRequest {
            system: "system",
            prompt: "prompt".into(),
            max_tokens: 10,
        };

        let result = complete(&client, &ai, Some("   "), &request).await;
        assert!(matches!(result, Err(AdviceError::MissingApiKey)));
        let result = complete(&client, &ai, None, &request).await;
        assert!(matches!(result, Err(AdviceError::MissingApiKey)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let client = create_client(Duration::from_secs(5)).unwrap();
        let ai = AiConfig {
            base_url: "http://127.0.0.1:1".into(),
            ..AiConfig::default()
        };
        let request = ChatRequest {
            system: "system",
            prompt: "prompt".into(),
            max_tokens: 10,
        };

        let result = complete(&client, &ai, Some("sk-test"), &request).await;
        assert!(matches!(result, Err(AdviceError::Network(_))));
    }
}

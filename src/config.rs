use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::models::AiProvider;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_AI_TIMEOUT_SECS: u64 = 60;

/// Where and how advice requests are sent.
///
/// The API key is deliberately absent: it is supplied by the user with each
/// request and never stored.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub provider: AiProvider,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl AiConfig {
    pub fn for_provider(provider: AiProvider) -> Self {
        Self {
            provider,
            base_url: provider.default_base_url().to_string(),
            model: provider.default_model().to_string(),
            timeout: Duration::from_secs(DEFAULT_AI_TIMEOUT_SECS),
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::for_provider(AiProvider::OpenAi)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub static_path: PathBuf,
    pub max_upload_bytes: usize,
    pub ai: AiConfig,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let provider = match env::var("SPENDCOACH_AI_PROVIDER") {
            Ok(value) => AiProvider::from_str(&value).unwrap_or_else(|_| {
                tracing::warn!(value = %value, "Unknown SPENDCOACH_AI_PROVIDER, using openai");
                AiProvider::OpenAi
            }),
            Err(_) => AiProvider::OpenAi,
        };

        let mut ai = AiConfig::for_provider(provider);
        if let Ok(base_url) = env::var("SPENDCOACH_AI_BASE_URL") {
            if !base_url.trim().is_empty() {
                ai.base_url = base_url.trim().to_string();
            }
        }
        if let Ok(model) = env::var("SPENDCOACH_AI_MODEL") {
            if !model.trim().is_empty() {
                ai.model = model.trim().to_string();
            }
        }
        ai.timeout = Duration::from_secs(parse_var(
            "SPENDCOACH_AI_TIMEOUT_SECS",
            DEFAULT_AI_TIMEOUT_SECS,
        ));

        Self {
            host: env::var("SPENDCOACH_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: parse_var("SPENDCOACH_PORT", 7070),
            static_path: env::var("SPENDCOACH_STATIC_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("static")),
            max_upload_bytes: parse_var("SPENDCOACH_MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES),
            ai,
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 7070,
            static_path: PathBuf::from("static"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            ai: AiConfig::default(),
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(value) => value.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(variable = name, value = %value, "Invalid value, using default");
            default
        }),
        Err(_) => default,
    }
}

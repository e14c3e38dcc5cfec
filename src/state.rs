use crate::config::Config;
use crate::error::AppResult;
use crate::services::ai_client::create_client;
use reqwest::Client;
use std::sync::Arc;

/// Shared, read-only application state. Nothing here changes after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http: Client,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let http = create_client(config.ai.timeout)?;
        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }
}

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::AppError;

pub const DEFAULT_CONFIG_PATH: &str = "config/chat.json";
pub const DEFAULT_ENDPOINT: &str = "https://openai-graphql-api.harlanhai7023.workers.dev";
pub const DEFAULT_TITLE: &str = "Harlan's GPT";
/// Environment variable (also read from `.env`) that overrides the endpoint.
pub const ENDPOINT_ENV: &str = "CHAT_GRAPHQL_ENDPOINT";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl AppConfig {
    /// Applies an endpoint given on the command line or through the environment.
    pub fn with_endpoint_override(mut self, endpoint: Option<String>) -> Self {
        if let Some(endpoint) = endpoint.map(|value| value.trim().to_string()) {
            if !endpoint.is_empty() {
                self.endpoint = endpoint;
            }
        }
        self
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let url = reqwest::Url::parse(&self.endpoint)
            .map_err(|err| AppError::Config(format!("invalid endpoint `{}`: {err}", self.endpoint)))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(AppError::Config(format!(
                "endpoint `{}` must use http or https, not {other}",
                self.endpoint
            ))),
        }
    }
}

pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            AppConfig::default()
        }
    }
}

use anyhow::Context;
use std::env;

use crate::companion::DEFAULT_MODEL;

pub const DEFAULT_LOG_FILTER: &str = "sparrow_svc=info,tower_http=debug,axum::rejection=info";

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub openrouter_api_key: Option<String>,
    pub model: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
            openrouter_api_key: env::var("OPENROUTER_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            model: env::var("SPARROW_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

// Keeps the API key out of startup logs
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field(
                "openrouter_api_key",
                &self.openrouter_api_key.as_ref().map(|_| "***API_KEY***"),
            )
            .field("model", &self.model)
            .finish()
    }
}

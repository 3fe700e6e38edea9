use std::net::SocketAddr;

use anyhow::Context;

use crate::logging::LogFormat;

/// Completion API settings shared by estimation and suggestions.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub suggestion_cuisine: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen_addr: SocketAddr,
    pub log_format: LogFormat,
    pub database_url: String,
    pub db_max_connections: u32,
    pub ai: AiConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = std::env::var("APP_PORT").unwrap_or_else(|_| "3001".into());
        let listen_addr = format!("{host}:{port}")
            .parse()
            .with_context(|| format!("invalid listen address {host}:{port}"))?;
        let log_format = std::env::var("LOG_FORMAT")
            .map(|v| v.parse())
            .unwrap_or(Ok(LogFormat::Text))?;
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let db_max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);
        let ai = AiConfig {
            api_key: std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY is not set")?,
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".into()),
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into()),
            timeout_secs: std::env::var("AI_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60),
            suggestion_cuisine: std::env::var("SUGGESTION_CUISINE")
                .unwrap_or_else(|_| "Brazilian".into()),
        };
        Ok(Self {
            listen_addr,
            log_format,
            database_url,
            db_max_connections,
            ai,
        })
    }
}

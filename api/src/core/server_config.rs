//! Listener address and CORS origins.

use axum::http::HeaderValue;
use thiserror::Error;

pub const DEFAULT_ADDRESS: &str = "0.0.0.0:8000";
pub const DEFAULT_ORIGINS: &str = "http://localhost,http://localhost:8501";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid origin `{0}` in ALLOWED_ORIGINS (expected http(s)://host[:port])")]
    InvalidOrigin(String),

    #[error("ALLOWED_ORIGINS must list at least one origin")]
    NoOrigins,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. `0.0.0.0:8000`.
    pub address: String,
    /// Browser origins allowed to call the API with credentials.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            allowed_origins: split_origins(DEFAULT_ORIGINS),
        }
    }
}

impl ServerConfig {
    /// Reads `API_ADDRESS` and `ALLOWED_ORIGINS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let address = get("API_ADDRESS")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_ADDRESS.to_string());

        let raw = get("ALLOWED_ORIGINS").unwrap_or_else(|| DEFAULT_ORIGINS.to_string());
        let allowed_origins = split_origins(&raw);
        if allowed_origins.is_empty() {
            return Err(ConfigError::NoOrigins);
        }
        for origin in &allowed_origins {
            let scheme_ok = origin.starts_with("http://") || origin.starts_with("https://");
            if !scheme_ok || HeaderValue::from_str(origin).is_err() {
                return Err(ConfigError::InvalidOrigin(origin.clone()));
            }
        }

        Ok(Self {
            address,
            allowed_origins,
        })
    }

    /// Origins as header values; entries already validated by [`Self::from_lookup`].
    pub fn origin_headers(&self) -> Vec<HeaderValue> {
        self.allowed_origins
            .iter()
            .filter_map(|o| HeaderValue::from_str(o).ok())
            .collect()
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

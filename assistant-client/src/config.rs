use std::time::Duration;

use clap::Parser;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Parser, Debug)]
#[command(name = "assistant-client")]
#[command(about = "Chat with the AI onboarding assistant and manage its company context", long_about = None)]
pub struct Cli {
    /// Backend base URL
    #[arg(long, env = "BACKEND_API_URL_BASE", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Seconds to wait for an answer
    #[arg(long, default_value_t = 45)]
    pub ask_timeout: u64,

    /// Seconds to wait when fetching the context
    #[arg(long, default_value_t = 15)]
    pub context_timeout: u64,

    /// Seconds to wait when updating the context
    #[arg(long, default_value_t = 20)]
    pub update_timeout: u64,

    /// Ask a single question, print the answer and exit
    #[arg(short = 'q', long)]
    pub question: Option<String>,
}

/// Resolved client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub ask_timeout: Duration,
    pub context_fetch_timeout: Duration,
    pub context_update_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            ask_timeout: Duration::from_secs(45),
            context_fetch_timeout: Duration::from_secs(15),
            context_update_timeout: Duration::from_secs(20),
        }
    }
}

impl From<&Cli> for ClientConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            base_url: cli.base_url.trim().trim_end_matches('/').to_string(),
            ask_timeout: Duration::from_secs(cli.ask_timeout),
            context_fetch_timeout: Duration::from_secs(cli.context_timeout),
            context_update_timeout: Duration::from_secs(cli.update_timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "assistant-client",
            "--base-url",
            "https://assistant.example.com/",
            "--ask-timeout",
            "5",
        ]);
        let cfg = ClientConfig::from(&cli);
        assert_eq!(cfg.base_url, "https://assistant.example.com");
        assert_eq!(cfg.ask_timeout, Duration::from_secs(5));
        assert_eq!(cfg.context_fetch_timeout, Duration::from_secs(15));
        assert_eq!(cfg.context_update_timeout, Duration::from_secs(20));
    }
}

use crate::{
    config::llm_provider::LlmProvider,
    error_handler::{ConfigError, ProviderError, ProviderErrorKind, Result, validate_range_f32},
};

/// Default request timeout when `timeout_secs` is not set.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for a text-generation model invocation.
///
/// # Fields
///
/// - `provider`: which hosted provider to call.
/// - `model`: model identifier (e.g., `"gemini-1.5-pro"`, `"gpt-4o-mini"`).
/// - `endpoint`: API base URL, without the operation path.
/// - `api_key`: credential for the provider.
/// - `max_tokens`: maximum number of tokens to generate (if supported).
/// - `temperature`: controls randomness.
/// - `top_p`: nucleus sampling cutoff.
/// - `timeout_secs`: request timeout enforced by the HTTP client.
///
/// # Examples
///
/// ```
/// use ai_llm_service::config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::Gemini,
///     model: "gemini-1.5-pro".to_string(),
///     endpoint: "https://generativelanguage.googleapis.com".to_string(),
///     api_key: Some("key".to_string()),
///     max_tokens: Some(1024),
///     temperature: Some(0.2),
///     top_p: None,
///     timeout_secs: Some(30),
/// };
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The hosted provider.
    pub provider: LlmProvider,

    /// Model identifier string.
    pub model: String,

    /// API base URL.
    pub endpoint: String,

    /// API key for authentication.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}

impl LlmModelConfig {
    /// Effective timeout, falling back to [`DEFAULT_TIMEOUT_SECS`].
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Checks the fields a client needs before any request is sent.
    ///
    /// # Errors
    /// - [`ConfigError::EmptyModel`] for a blank model name
    /// - [`ProviderErrorKind::MissingApiKey`] when no key is configured
    /// - [`ConfigError::OutOfRange`] for sampling parameters outside their ranges
    /// - [`ConfigError::InvalidNumber`] for a zero timeout
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }
        if self.api_key.as_deref().is_none_or(|k| k.trim().is_empty()) {
            let provider = match self.provider {
                LlmProvider::Gemini => crate::error_handler::Provider::Gemini,
                LlmProvider::OpenAI => crate::error_handler::Provider::OpenAI,
            };
            return Err(ProviderError::new(provider, ProviderErrorKind::MissingApiKey).into());
        }
        if let Some(t) = self.temperature {
            validate_range_f32("temperature", t, 0.0, 2.0)?;
        }
        if let Some(p) = self.top_p {
            validate_range_f32("top_p", p, 0.0, 1.0)?;
        }
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidNumber {
                var: "LLM_TIMEOUT_SECS",
                reason: "timeout must be at least 1 second",
            }
            .into());
        }
        Ok(())
    }
}

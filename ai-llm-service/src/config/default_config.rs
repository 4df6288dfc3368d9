//! Default generation configs loaded strictly from environment variables.
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_KIND`         = provider kind (`gemini` default, or `openai`)
//! - `LLM_MAX_TOKENS`   = optional max tokens (u32)
//! - `LLM_TEMPERATURE`  = optional sampling temperature (f32, `0.0..=2.0`)
//! - `LLM_TIMEOUT_SECS` = optional request timeout (u64)
//!
//! Gemini:
//! - `GOOGLE_API_KEY` (mandatory)
//! - `GEMINI_MODEL`   (default `gemini-1.5-pro`)
//! - `GEMINI_URL`     (default `https://generativelanguage.googleapis.com`)
//!
//! OpenAI-compatible:
//! - `OPENAI_API_KEY` (mandatory)
//! - `OPENAI_MODEL`   (default `gpt-4o-mini`)
//! - `OPENAI_URL`     (default `https://api.openai.com`)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        Result, env_opt, env_opt_f32, env_opt_u32, env_opt_u64, must_env, validate_http_endpoint,
    },
};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro";
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com";

/// Builds the generation config selected by `LLM_KIND`.
///
/// # Errors
/// - [`ConfigError::UnsupportedProvider`](crate::error_handler::ConfigError::UnsupportedProvider) for an unknown `LLM_KIND`
/// - [`ConfigError::MissingVar`](crate::error_handler::ConfigError::MissingVar) when the provider key is absent
/// - number/range/format errors for the optional knobs
pub fn config_from_env() -> Result<LlmModelConfig> {
    let provider = match env_opt("LLM_KIND") {
        Some(kind) => kind.parse::<LlmProvider>()?,
        None => LlmProvider::Gemini,
    };

    let cfg = match provider {
        LlmProvider::Gemini => config_gemini()?,
        LlmProvider::OpenAI => config_openai()?,
    };
    cfg.validate()?;
    Ok(cfg)
}

/// Constructs a Gemini config.
///
/// # Defaults
/// - `temperature = Some(0.2)` unless `LLM_TEMPERATURE` is set
/// - `timeout_secs = Some(60)` unless `LLM_TIMEOUT_SECS` is set
pub fn config_gemini() -> Result<LlmModelConfig> {
    let api_key = must_env("GOOGLE_API_KEY")?;
    let endpoint = env_opt("GEMINI_URL").unwrap_or_else(|| DEFAULT_GEMINI_URL.to_string());
    validate_http_endpoint("GEMINI_URL", &endpoint)?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Gemini,
        model: env_opt("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
        endpoint,
        api_key: Some(api_key),
        max_tokens: env_opt_u32("LLM_MAX_TOKENS")?,
        temperature: Some(env_opt_f32("LLM_TEMPERATURE")?.unwrap_or(0.2)),
        top_p: None,
        timeout_secs: Some(env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(60)),
    })
}

/// Constructs an OpenAI-compatible config.
pub fn config_openai() -> Result<LlmModelConfig> {
    let api_key = must_env("OPENAI_API_KEY")?;
    let endpoint = env_opt("OPENAI_URL").unwrap_or_else(|| DEFAULT_OPENAI_URL.to_string());
    validate_http_endpoint("OPENAI_URL", &endpoint)?;

    Ok(LlmModelConfig {
        provider: LlmProvider::OpenAI,
        model: env_opt("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
        endpoint,
        api_key: Some(api_key),
        max_tokens: env_opt_u32("LLM_MAX_TOKENS")?,
        temperature: Some(env_opt_f32("LLM_TEMPERATURE")?.unwrap_or(0.2)),
        top_p: None,
        timeout_secs: Some(env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(60)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handler::{AiLlmError, ConfigError};
    use serial_test::serial;

    const VARS: [&str; 8] = [
        "LLM_KIND",
        "LLM_MAX_TOKENS",
        "LLM_TEMPERATURE",
        "LLM_TIMEOUT_SECS",
        "GOOGLE_API_KEY",
        "GEMINI_MODEL",
        "GEMINI_URL",
        "OPENAI_API_KEY",
    ];

    fn clear() {
        for v in VARS {
            // SAFETY: tests touching the environment are serialized.
            unsafe { std::env::remove_var(v) };
        }
    }

    fn set(k: &str, v: &str) {
        // SAFETY: tests touching the environment are serialized.
        unsafe { std::env::set_var(k, v) };
    }

    #[test]
    #[serial]
    fn gemini_is_default_and_needs_key() {
        clear();
        let err = config_from_env().unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Config(ConfigError::MissingVar("GOOGLE_API_KEY"))
        ));

        set("GOOGLE_API_KEY", "g-key");
        let cfg = config_from_env().unwrap();
        assert_eq!(cfg.provider, LlmProvider::Gemini);
        assert_eq!(cfg.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(cfg.timeout_secs, Some(60));
        clear();
    }

    #[test]
    #[serial]
    fn openai_kind_and_overrides() {
        clear();
        set("LLM_KIND", "openai");
        set("OPENAI_API_KEY", "sk");
        set("LLM_TIMEOUT_SECS", "5");
        set("LLM_MAX_TOKENS", "256");
        let cfg = config_from_env().unwrap();
        assert_eq!(cfg.provider, LlmProvider::OpenAI);
        assert_eq!(cfg.timeout_secs, Some(5));
        assert_eq!(cfg.max_tokens, Some(256));
        clear();
    }

    #[test]
    #[serial]
    fn rejects_bad_numbers_and_unknown_kind() {
        clear();
        set("GOOGLE_API_KEY", "g-key");
        set("LLM_TIMEOUT_SECS", "soon");
        assert!(matches!(
            config_from_env(),
            Err(AiLlmError::Config(ConfigError::InvalidNumber { var: "LLM_TIMEOUT_SECS", .. }))
        ));

        set("LLM_TIMEOUT_SECS", "0");
        assert!(matches!(
            config_from_env(),
            Err(AiLlmError::Config(ConfigError::InvalidNumber { var: "LLM_TIMEOUT_SECS", .. }))
        ));

        clear();
        set("LLM_KIND", "mystery");
        assert!(matches!(
            config_from_env(),
            Err(AiLlmError::Config(ConfigError::UnsupportedProvider(_)))
        ));
        clear();
    }
}

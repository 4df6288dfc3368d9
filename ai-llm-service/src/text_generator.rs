//! Provider-agnostic text generation seam.
//!
//! Construct once at startup with [`build_generator`], wrap in `Arc`, and share.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::Result,
    services::{gemini_service::GeminiService, open_ai_service::OpenAiService},
};

/// A single-shot, non-streaming text generator.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates text for `prompt`, optionally steered by a `system` instruction.
    async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String>;

    /// Model identifier, for logs.
    fn model(&self) -> &str;
}

/// Builds the client for `cfg.provider`.
///
/// # Errors
/// Propagates the provider constructor's validation errors.
pub fn build_generator(cfg: LlmModelConfig) -> Result<Arc<dyn TextGenerator>> {
    Ok(match cfg.provider {
        LlmProvider::Gemini => Arc::new(GeminiService::new(cfg)?),
        LlmProvider::OpenAI => Arc::new(OpenAiService::new(cfg)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_matching_client() {
        let cfg = LlmModelConfig {
            provider: LlmProvider::Gemini,
            model: "gemini-1.5-flash".into(),
            endpoint: "https://generativelanguage.googleapis.com".into(),
            api_key: Some("k".into()),
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: None,
        };
        let generator = build_generator(cfg).unwrap();
        assert_eq!(generator.model(), "gemini-1.5-flash");
    }
}

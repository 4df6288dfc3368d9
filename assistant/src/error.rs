//! Typed error for the assistant crate.

use ai_llm_service::AiLlmError;
use context_store::{ContextError, StoreError};
use thiserror::Error;

/// Closed set of failure kinds surfaced to callers.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// Caller input violated a precondition (empty question or context).
    #[error("{0}")]
    InvalidRequest(String),

    /// The generation API or the store failed or returned something unusable.
    #[error("{message}")]
    Upstream {
        message: String,
        /// `true` when the upstream call timed out.
        timeout: bool,
    },

    /// Required configuration is missing; fatal at startup.
    #[error("not configured: {0}")]
    NotConfigured(String),
}

impl AssistantError {
    pub fn upstream(message: impl Into<String>) -> Self {
        AssistantError::Upstream {
            message: message.into(),
            timeout: false,
        }
    }
}

impl From<AiLlmError> for AssistantError {
    fn from(err: AiLlmError) -> Self {
        match err {
            AiLlmError::Config(e) => AssistantError::NotConfigured(e.to_string()),
            other => AssistantError::Upstream {
                timeout: other.is_timeout(),
                message: format!("An error occurred processing the question: {other}"),
            },
        }
    }
}

impl From<ContextError> for AssistantError {
    fn from(err: ContextError) -> Self {
        match err {
            ContextError::Validation(msg) => AssistantError::InvalidRequest(msg.to_string()),
            ContextError::Store(e) => e.into(),
        }
    }
}

impl From<StoreError> for AssistantError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotConfigured(msg) => AssistantError::NotConfigured(msg),
            other => AssistantError::Upstream {
                timeout: matches!(other, StoreError::Timeout(_)),
                message: format!("Could not reach the context store: {other}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn maps_llm_timeout_to_upstream_timeout() {
        let err: AssistantError = AiLlmError::Timeout(Duration::from_secs(3)).into();
        match err {
            AssistantError::Upstream { timeout, message } => {
                assert!(timeout);
                assert!(message.contains("timed out"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn maps_context_validation_to_invalid_request() {
        let err: AssistantError = ContextError::Validation("New context cannot be empty").into();
        assert!(matches!(err, AssistantError::InvalidRequest(m) if m == "New context cannot be empty"));
    }

    #[test]
    fn maps_store_config_to_not_configured() {
        let err: AssistantError = StoreError::NotConfigured("SUPABASE_URL".into()).into();
        assert!(matches!(err, AssistantError::NotConfigured(_)));
    }
}

//! Question answering over the stored company context.
//!
//! Public API: [`Assistant`]. Each operation is a single stateless round trip:
//! read the context, call the generator once, log the exchange best-effort.
//! Nothing is retried.

mod error;
pub mod prompt;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

use std::sync::Arc;

use ai_llm_service::{TextGenerator, build_generator, config::default_config::config_from_env};
use context_store::{ContextAccessor, QaLogEntry, StoreConfig};
use tracing::{error, info, instrument};

pub use error::AssistantError;

pub type Result<T> = std::result::Result<T, AssistantError>;

/// Shared, cheaply clonable service used by every request handler.
#[derive(Clone)]
pub struct Assistant {
    context: ContextAccessor,
    generator: Arc<dyn TextGenerator>,
}

impl Assistant {
    pub fn new(context: ContextAccessor, generator: Arc<dyn TextGenerator>) -> Self {
        Self { context, generator }
    }

    /// Builds the store and the generator from environment variables.
    ///
    /// # Errors
    /// [`AssistantError::NotConfigured`] naming the first missing or invalid setting.
    pub fn from_env() -> Result<Self> {
        let store = StoreConfig::from_env()?.build()?;
        let generator = build_generator(config_from_env()?)
            .map_err(|e| AssistantError::NotConfigured(e.to_string()))?;
        info!(
            store = store.backend(),
            model = generator.model(),
            "assistant configured"
        );
        Ok(Self::new(ContextAccessor::new(store), generator))
    }

    /// Answers `question` strictly from the stored context.
    ///
    /// # Errors
    /// - [`AssistantError::InvalidRequest`] for a blank question; the generator is not called
    /// - [`AssistantError::Upstream`] when generation fails or yields no text
    #[instrument(name = "ask", skip(self, question), fields(question_len = question.len()))]
    pub async fn ask(&self, question: &str) -> Result<String> {
        if question.trim().is_empty() {
            return Err(AssistantError::InvalidRequest(
                "Question cannot be empty".to_string(),
            ));
        }

        let context = self.context.fetch_context().await;
        let user_prompt = prompt::build_user_prompt(&context, question);

        let raw = self
            .generator
            .generate(&user_prompt, Some(prompt::SYSTEM_PROMPT))
            .await
            .map_err(|e| {
                error!(error = %e, model = self.generator.model(), "generation failed");
                AssistantError::from(e)
            })?;

        let answer = raw.trim();
        if answer.is_empty() {
            return Err(AssistantError::upstream(
                "An error occurred processing the question: the model returned an empty answer",
            ));
        }

        self.context.append_log(question, answer).await;

        info!(answer_len = answer.len(), "question answered");
        Ok(answer.to_string())
    }

    /// Current context document; never fails.
    pub async fn get_context(&self) -> String {
        self.context.fetch_context().await
    }

    /// Replaces the context document.
    ///
    /// # Errors
    /// - [`AssistantError::InvalidRequest`] for blank content
    /// - [`AssistantError::Upstream`] when the store write fails
    pub async fn set_context(&self, new_content: &str) -> Result<()> {
        self.context.replace_context(new_content).await?;
        info!(len = new_content.len(), "context updated");
        Ok(())
    }

    /// Latest logged exchanges, most recent first.
    pub async fn history(&self, limit: usize) -> Result<Vec<QaLogEntry>> {
        Ok(self.context.recent_history(limit).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedGenerator;
    use ai_llm_service::AiLlmError;
    use context_store::{ContextStore, FALLBACK_CONTEXT, InMemoryStore};
    use std::time::Duration;

    fn assistant(store: Arc<InMemoryStore>, generator: Arc<ScriptedGenerator>) -> Assistant {
        Assistant::new(ContextAccessor::new(store), generator)
    }

    #[tokio::test]
    async fn blank_question_never_reaches_generator() {
        let generator = Arc::new(ScriptedGenerator::answering("unused"));
        let a = assistant(Arc::new(InMemoryStore::new()), generator.clone());

        for q in ["", "   "] {
            let err = a.ask(q).await.unwrap_err();
            assert!(matches!(err, AssistantError::InvalidRequest(_)));
        }
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn answer_is_trimmed_logged_and_grounded_in_context() {
        let store = Arc::new(InMemoryStore::with_context("PTO policy: 20 days/year."));
        let generator = Arc::new(ScriptedGenerator::answering("  You get 20 days of PTO per year.\n"));
        let a = assistant(store.clone(), generator.clone());

        let answer = a.ask("How many PTO days do I get?").await.unwrap();
        assert_eq!(answer, "You get 20 days of PTO per year.");

        let prompt = generator.last_prompt().unwrap();
        assert!(prompt.contains("PTO policy: 20 days/year."));
        assert!(prompt.contains("How many PTO days do I get?"));
        assert_eq!(generator.last_system().as_deref(), Some(prompt::SYSTEM_PROMPT));

        let log = store.recent_logs(10).await.unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].answer, "You get 20 days of PTO per year.");
    }

    #[tokio::test]
    async fn unreachable_store_still_answers_from_fallback() {
        let store = Arc::new(InMemoryStore::new());
        store.set_unavailable(true);
        let generator = Arc::new(ScriptedGenerator::answering("I don't have that information."));
        let a = assistant(store, generator.clone());

        let answer = a.ask("What is the dress code?").await.unwrap();
        assert_eq!(answer, "I don't have that information.");
        assert!(generator.last_prompt().unwrap().contains(FALLBACK_CONTEXT));
    }

    #[tokio::test]
    async fn log_failure_does_not_change_answer() {
        let store = Arc::new(InMemoryStore::with_context("doc"));
        store.set_log_unavailable(true);
        let a = assistant(store, Arc::new(ScriptedGenerator::answering("answer")));

        assert_eq!(a.ask("q").await.unwrap(), "answer");
    }

    #[tokio::test]
    async fn generator_timeout_is_upstream_and_not_logged() {
        let store = Arc::new(InMemoryStore::with_context("doc"));
        let generator = Arc::new(ScriptedGenerator::failing(|| {
            AiLlmError::Timeout(Duration::from_secs(60))
        }));
        let a = assistant(store.clone(), generator);

        let err = a.ask("q").await.unwrap_err();
        assert!(matches!(err, AssistantError::Upstream { timeout: true, .. }));
        assert!(err.to_string().contains("timed out"));
        assert_eq!(store.log_len().await, 0);
    }

    #[tokio::test]
    async fn whitespace_only_answer_is_upstream_error() {
        let a = assistant(
            Arc::new(InMemoryStore::new()),
            Arc::new(ScriptedGenerator::answering("  \n ")),
        );
        assert!(matches!(
            a.ask("q").await,
            Err(AssistantError::Upstream { timeout: false, .. })
        ));
    }

    #[tokio::test]
    async fn set_then_get_context() {
        let a = assistant(
            Arc::new(InMemoryStore::new()),
            Arc::new(ScriptedGenerator::answering("x")),
        );
        assert_eq!(a.get_context().await, FALLBACK_CONTEXT);

        a.set_context("PTO policy: 20 days/year.").await.unwrap();
        assert_eq!(a.get_context().await, "PTO policy: 20 days/year.");

        assert!(matches!(
            a.set_context("").await,
            Err(AssistantError::InvalidRequest(_))
        ));
        assert_eq!(a.get_context().await, "PTO policy: 20 days/year.");
    }

    #[tokio::test]
    async fn set_context_store_failure_is_upstream() {
        let store = Arc::new(InMemoryStore::new());
        store.set_unavailable(true);
        let a = assistant(store, Arc::new(ScriptedGenerator::answering("x")));
        assert!(matches!(
            a.set_context("text").await,
            Err(AssistantError::Upstream { .. })
        ));
    }

    #[tokio::test]
    async fn history_lists_latest_first() {
        let store = Arc::new(InMemoryStore::with_context("doc"));
        let a = assistant(store, Arc::new(ScriptedGenerator::answering("a")));
        a.ask("first").await.unwrap();
        a.ask("second").await.unwrap();

        let h = a.history(10).await.unwrap();
        assert_eq!(h[0].question, "second");
        assert_eq!(h[1].question, "first");
    }
}

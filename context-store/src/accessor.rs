//! Caller-facing policy over a [`ContextStore`].
//!
//! - reads never fail: anything unusable becomes [`FALLBACK_CONTEXT`]
//! - writes validate input and report store failures
//! - log appends are best-effort and never reach the caller
//!
//! Concurrent `replace_context` calls race: the last write wins. No
//! compare-and-swap is attempted.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::{
    errors::{ContextError, StoreError},
    model::{FALLBACK_CONTEXT, QaLogEntry},
    store::ContextStore,
};

/// Upper bound for history queries.
pub const MAX_HISTORY: usize = 100;

#[derive(Clone)]
pub struct ContextAccessor {
    store: Arc<dyn ContextStore>,
}

impl ContextAccessor {
    pub fn new(store: Arc<dyn ContextStore>) -> Self {
        Self { store }
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    /// Current document, or [`FALLBACK_CONTEXT`] when absent, blank or unreadable.
    #[instrument(name = "fetch_context", skip(self), fields(backend = self.store.backend()))]
    pub async fn fetch_context(&self) -> String {
        match self.store.load_context().await {
            Ok(Some(content)) if !content.trim().is_empty() => content,
            Ok(_) => {
                debug!("no context stored, using fallback");
                FALLBACK_CONTEXT.to_string()
            }
            Err(e) => {
                warn!(error = %e, "context fetch failed, using fallback");
                FALLBACK_CONTEXT.to_string()
            }
        }
    }

    /// Replaces the document.
    ///
    /// # Errors
    /// - [`ContextError::Validation`] when `new_content` is blank; nothing is written
    /// - [`ContextError::Store`] when the upsert fails
    #[instrument(name = "replace_context", skip(self, new_content), fields(len = new_content.len()))]
    pub async fn replace_context(&self, new_content: &str) -> Result<(), ContextError> {
        if new_content.trim().is_empty() {
            return Err(ContextError::Validation("New context cannot be empty"));
        }
        self.store.upsert_context(new_content).await?;
        Ok(())
    }

    /// Records one exchange. Failures are logged and dropped.
    pub async fn append_log(&self, question: &str, answer: &str) {
        if let Err(e) = self.store.insert_log(question, answer).await {
            warn!(error = %e, "failed to log Q&A exchange");
        }
    }

    /// Latest exchanges, most recent first. `limit` is clamped to `1..=MAX_HISTORY`.
    pub async fn recent_history(&self, limit: usize) -> Result<Vec<QaLogEntry>, StoreError> {
        self.store.recent_logs(limit.clamp(1, MAX_HISTORY)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryStore;

    fn accessor(store: Arc<InMemoryStore>) -> ContextAccessor {
        ContextAccessor::new(store)
    }

    #[tokio::test]
    async fn fetch_falls_back_when_empty_blank_or_down() {
        let store = Arc::new(InMemoryStore::new());
        let acc = accessor(store.clone());
        assert_eq!(acc.fetch_context().await, FALLBACK_CONTEXT);

        store.upsert_context("   ").await.unwrap();
        assert_eq!(acc.fetch_context().await, FALLBACK_CONTEXT);

        store.upsert_context("PTO policy: 20 days/year.").await.unwrap();
        assert_eq!(acc.fetch_context().await, "PTO policy: 20 days/year.");

        store.set_unavailable(true);
        assert_eq!(acc.fetch_context().await, FALLBACK_CONTEXT);
    }

    #[tokio::test]
    async fn empty_replace_is_rejected_and_leaves_document() {
        let store = Arc::new(InMemoryStore::with_context("original"));
        let acc = accessor(store.clone());

        for bad in ["", "  \n\t"] {
            let err = acc.replace_context(bad).await.unwrap_err();
            assert!(matches!(err, ContextError::Validation(_)));
        }
        assert_eq!(acc.fetch_context().await, "original");
    }

    #[tokio::test]
    async fn replace_then_fetch_reads_back() {
        let acc = accessor(Arc::new(InMemoryStore::new()));
        acc.replace_context("PTO policy: 20 days/year.").await.unwrap();
        assert_eq!(acc.fetch_context().await, "PTO policy: 20 days/year.");
    }

    #[tokio::test]
    async fn replace_reports_store_failure() {
        let store = Arc::new(InMemoryStore::new());
        store.set_unavailable(true);
        let err = accessor(store).replace_context("text").await.unwrap_err();
        assert!(matches!(err, ContextError::Store(StoreError::Unavailable(_))));
    }

    #[tokio::test]
    async fn append_log_swallows_failures() {
        let store = Arc::new(InMemoryStore::new());
        let acc = accessor(store.clone());

        acc.append_log("q1", "a1").await;
        store.set_log_unavailable(true);
        acc.append_log("q2", "a2").await;

        assert_eq!(store.log_len().await, 1);
    }

    #[tokio::test]
    async fn history_limit_is_clamped() {
        let store = Arc::new(InMemoryStore::new());
        let acc = accessor(store.clone());
        for i in 0..3 {
            acc.append_log(&format!("q{i}"), "a").await;
        }
        assert_eq!(acc.recent_history(0).await.unwrap().len(), 1);
        assert_eq!(acc.recent_history(10_000).await.unwrap().len(), 3);
    }
}

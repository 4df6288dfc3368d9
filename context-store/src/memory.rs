//! Process-local backend. Holds the singleton document and the log in memory;
//! nothing survives a restart.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    errors::{Result, StoreError},
    model::QaLogEntry,
    store::ContextStore,
};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    context: RwLock<Option<String>>,
    log: RwLock<Vec<QaLogEntry>>,
    context_down: AtomicBool,
    log_down: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with a document already stored.
    pub fn with_context(content: impl Into<String>) -> Self {
        Self {
            context: RwLock::new(Some(content.into())),
            ..Self::default()
        }
    }

    /// Makes every operation fail with [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, down: bool) {
        self.context_down.store(down, Ordering::SeqCst);
        self.log_down.store(down, Ordering::SeqCst);
    }

    /// Makes only the log operations fail.
    pub fn set_log_unavailable(&self, down: bool) {
        self.log_down.store(down, Ordering::SeqCst);
    }

    /// Number of stored log entries.
    pub async fn log_len(&self) -> usize {
        self.log.read().await.len()
    }

    fn check(flag: &AtomicBool) -> Result<()> {
        if flag.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("in-memory store switched off".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ContextStore for InMemoryStore {
    async fn load_context(&self) -> Result<Option<String>> {
        Self::check(&self.context_down)?;
        Ok(self.context.read().await.clone())
    }

    async fn upsert_context(&self, content: &str) -> Result<()> {
        Self::check(&self.context_down)?;
        *self.context.write().await = Some(content.to_string());
        Ok(())
    }

    async fn insert_log(&self, question: &str, answer: &str) -> Result<()> {
        Self::check(&self.log_down)?;
        self.log.write().await.push(QaLogEntry {
            question: question.to_string(),
            answer: answer.to_string(),
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn recent_logs(&self, limit: usize) -> Result<Vec<QaLogEntry>> {
        Self::check(&self.log_down)?;
        Ok(self.log.read().await.iter().rev().take(limit).cloned().collect())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upsert_replaces_whole_document() {
        let store = InMemoryStore::new();
        assert_eq!(store.load_context().await.unwrap(), None);

        store.upsert_context("first").await.unwrap();
        store.upsert_context("second").await.unwrap();
        assert_eq!(store.load_context().await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn logs_are_returned_newest_first() {
        let store = InMemoryStore::new();
        store.insert_log("q1", "a1").await.unwrap();
        store.insert_log("q2", "a2").await.unwrap();
        store.insert_log("q3", "a3").await.unwrap();

        let recent = store.recent_logs(2).await.unwrap();
        let questions: Vec<_> = recent.iter().map(|e| e.question.as_str()).collect();
        assert_eq!(questions, ["q3", "q2"]);
    }

    #[tokio::test]
    async fn fault_injection() {
        let store = InMemoryStore::with_context("doc");
        store.set_log_unavailable(true);
        assert!(store.insert_log("q", "a").await.is_err());
        assert_eq!(store.load_context().await.unwrap().as_deref(), Some("doc"));

        store.set_unavailable(true);
        assert!(matches!(
            store.load_context().await,
            Err(StoreError::Unavailable(_))
        ));
        store.set_unavailable(false);
        assert!(store.upsert_context("x").await.is_ok());
    }
}

use async_trait::async_trait;

use crate::{errors::Result, model::QaLogEntry};

/// Raw persistence operations. Every failure is reported; policy lives in
/// [`ContextAccessor`](crate::ContextAccessor).
#[async_trait]
pub trait ContextStore: Send + Sync {
    /// Content of the singleton document, `None` when it was never written.
    async fn load_context(&self) -> Result<Option<String>>;

    /// Creates or fully replaces the singleton document.
    async fn upsert_context(&self, content: &str) -> Result<()>;

    /// Appends one exchange to the log.
    async fn insert_log(&self, question: &str, answer: &str) -> Result<()>;

    /// Latest `limit` log entries, most recent first.
    async fn recent_logs(&self, limit: usize) -> Result<Vec<QaLogEntry>>;

    /// Backend name, for logs.
    fn backend(&self) -> &'static str;
}

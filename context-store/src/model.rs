use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Well-known id of the singleton context row.
pub const CONTEXT_ID: i64 = 1;

/// Returned whenever no usable context document can be read.
pub const FALLBACK_CONTEXT: &str = "No company context has been set yet.";

/// The single, fully replaced knowledge document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextDocument {
    pub id: i64,
    pub content: String,
}

/// One question/answer exchange, as stored in `qa_log`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaLogEntry {
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}

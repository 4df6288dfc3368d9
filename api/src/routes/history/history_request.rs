use chrono::{DateTime, Utc};
use context_store::QaLogEntry;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: usize = 20;

/// Query for GET /history.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Max entries; clamped to 1..=100 by the store accessor.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Response payload for GET /history.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub entries: Vec<HistoryItem>,
}

#[derive(Debug, Serialize)]
pub struct HistoryItem {
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}

impl From<QaLogEntry> for HistoryItem {
    fn from(e: QaLogEntry) -> Self {
        Self {
            question: e.question,
            answer: e.answer,
            created_at: e.created_at,
        }
    }
}

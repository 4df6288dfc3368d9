//! Cached copy of the company context plus the edit flow.

use tracing::{info, warn};

use crate::{api_client::AssistantApi, error::ErrorClass};

pub const EMPTY_CONTEXT_WARNING: &str = "Context cannot be empty.";

/// Result of submitting edited context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    /// Rejected locally; no request was sent.
    Rejected(&'static str),
    Failed(String),
}

#[derive(Debug, Default)]
pub struct ContextPanel {
    cached: Option<String>,
    warning: Option<String>,
}

impl ContextPanel {
    /// Fetches the context once. A failed fetch caches nothing and keeps a warning.
    pub async fn load(api: &dyn AssistantApi) -> Self {
        match api.get_context().await {
            Ok(context) => {
                info!(len = context.len(), "context fetched");
                Self {
                    cached: Some(context),
                    warning: None,
                }
            }
            Err(e) => {
                warn!(error = %e, "context fetch failed");
                let warning = match e.class() {
                    ErrorClass::Timeout => "Error: Request to backend timed out.".to_string(),
                    ErrorClass::Request => format!("Error: Could not connect to backend ({e})"),
                    ErrorClass::Unexpected => {
                        format!("Error: Unexpected issue fetching context ({e})")
                    }
                };
                Self {
                    cached: None,
                    warning: Some(warning),
                }
            }
        }
    }

    pub fn cached(&self) -> Option<&str> {
        self.cached.as_deref()
    }

    /// Text to pre-fill the editor with; empty after a failed fetch.
    pub fn editor_value(&self) -> &str {
        self.cached.as_deref().unwrap_or_default()
    }

    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    /// Sends `new_context` and, on success, replaces the cached value without refetching.
    pub async fn submit(&mut self, api: &dyn AssistantApi, new_context: &str) -> UpdateOutcome {
        if new_context.trim().is_empty() {
            return UpdateOutcome::Rejected(EMPTY_CONTEXT_WARNING);
        }

        match api.set_context(new_context).await {
            Ok(()) => {
                self.cached = Some(new_context.to_string());
                self.warning = None;
                UpdateOutcome::Updated
            }
            Err(e) => UpdateOutcome::Failed(match e.class() {
                ErrorClass::Timeout => "Error: Request to update context timed out.".to_string(),
                ErrorClass::Request => format!("Error updating context: {e}"),
                ErrorClass::Unexpected => {
                    format!("An unexpected error occurred during update: {e}")
                }
            }),
        }
    }
}

use assistant::{Assistant, AssistantError};

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Context store + text generator behind one service.
    pub assistant: Assistant,
}

impl AppState {
    pub fn new(assistant: Assistant) -> Self {
        Self { assistant }
    }

    /// Load shared state from environment variables.
    pub fn from_env() -> Result<Self, AssistantError> {
        Ok(Self::new(Assistant::from_env()?))
    }
}

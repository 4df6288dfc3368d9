use serde::{Deserialize, Serialize};

/// Request payload for POST /context.
#[derive(Debug, Deserialize)]
pub struct ContextUpdateRequest {
    /// Full replacement text for the context document.
    pub new_context: String,
}

/// Response payload for GET /context.
#[derive(Debug, Serialize)]
pub struct ContextResponse {
    pub context: String,
}

/// Plain `{message}` acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

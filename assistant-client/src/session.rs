//! Chat transcript. Lives for one client run and is never persisted.

use std::fmt;

use crate::{api_client::AssistantApi, error::ErrorClass};

pub const NO_ANSWER: &str = "Sorry, I couldn't get an answer.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Assistant => f.write_str("assistant"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    /// Assistant entry that reports a failure instead of an answer.
    pub is_error: bool,
}

#[derive(Debug, Default)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage {
            role: Role::User,
            content: content.into(),
            is_error: false,
        });
    }

    pub fn push_assistant(&mut self, content: impl Into<String>, is_error: bool) {
        self.messages.push(ChatMessage {
            role: Role::Assistant,
            content: content.into(),
            is_error,
        });
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Records `question`, asks the backend and records exactly one assistant reply.
    ///
    /// Every failure becomes a visible transcript entry; nothing is returned as `Err`.
    pub async fn submit(&mut self, api: &dyn AssistantApi, question: &str) -> &ChatMessage {
        self.push_user(question);

        let (content, is_error) = match api.ask(question).await {
            Ok(Some(answer)) => (answer, false),
            Ok(None) => (NO_ANSWER.to_string(), false),
            Err(e) => {
                let text = match e.class() {
                    ErrorClass::Timeout => {
                        "Sorry, the request to the AI service timed out. Please try again."
                            .to_string()
                    }
                    ErrorClass::Request => {
                        format!("Sorry, I couldn't connect to the AI service. Error: {e}")
                    }
                    ErrorClass::Unexpected => format!("An unexpected error occurred: {e}"),
                };
                (text, true)
            }
        };
        self.push_assistant(content, is_error);

        // The assistant reply was pushed just above.
        &self.messages[self.messages.len() - 1]
    }
}

//! Terminal chat client for the onboarding assistant.
//!
//! - [`api_client`]: the [`AssistantApi`] seam and its HTTP implementation
//! - [`session`]: the in-memory chat transcript
//! - [`context_panel`]: cached context document and edit flow
//! - [`repl`]: interactive loop and slash commands
//! - [`config`]: CLI flags and timeouts
//! - [`env_file`]: outcome of loading `.env`

pub mod api_client;
pub mod config;
pub mod context_panel;
pub mod env_file;
pub mod error;
pub mod repl;
pub mod session;

pub use api_client::{AssistantApi, HttpAssistantApi};
pub use config::{Cli, ClientConfig};
pub use context_panel::{ContextPanel, UpdateOutcome};
pub use env_file::EnvFile;
pub use error::{ClientError, ErrorClass};
pub use session::{ChatMessage, ChatSession, Role};

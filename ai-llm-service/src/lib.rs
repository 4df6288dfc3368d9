//! Text-generation clients for hosted LLM APIs.
//!
//! - [`config`]: model config, provider kind and env loaders
//! - [`services`]: Gemini and OpenAI-compatible HTTP clients
//! - [`text_generator`]: the [`TextGenerator`] seam shared by both
//! - [`error_handler`]: unified [`AiLlmError`]
//! - [`telemetry`]: crate-scoped tracing layer

pub mod config;
pub mod error_handler;
pub mod services;
pub mod telemetry;
pub mod text_generator;

pub use config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
pub use error_handler::{AiLlmError, ConfigError};
pub use text_generator::{TextGenerator, build_generator};

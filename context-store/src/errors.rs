//! Error types for the context store.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Failure of a raw store operation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Required configuration is missing or malformed (startup only).
    #[error("store not configured: {0}")]
    NotConfigured(String),

    /// Network/transport failure talking to the store.
    #[error("store transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The store did not answer within the client timeout.
    #[error("store request timed out after {0:?}")]
    Timeout(Duration),

    /// The store answered with a non-success status.
    #[error("store returned HTTP {status} for {table}: {snippet}")]
    HttpStatus {
        status: StatusCode,
        table: &'static str,
        snippet: String,
    },

    /// The response body did not have the expected shape.
    #[error("store response could not be decoded: {0}")]
    Decode(String),

    /// The backend is deliberately offline (in-memory fault injection).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub(crate) fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            StoreError::Timeout(timeout)
        } else if err.is_decode() {
            StoreError::Decode(err.to_string())
        } else {
            StoreError::Transport(err)
        }
    }
}

/// Failure of a context write through [`ContextAccessor`](crate::ContextAccessor).
#[derive(Debug, Error)]
pub enum ContextError {
    /// Caller input violated a precondition.
    #[error("{0}")]
    Validation(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),
}

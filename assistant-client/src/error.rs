use std::time::Duration;

use thiserror::Error;

/// Failure of one call to the assistant API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No response within the per-call timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Could not reach the backend (DNS, refused connection, TLS, reset).
    #[error("{0}")]
    Connect(String),

    /// The backend answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body was not what the API promises.
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// How an error is presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Timeout,
    /// Transport failures and error statuses.
    Request,
    Unexpected,
}

impl ClientError {
    pub(crate) fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(timeout)
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Connect(err.to_string())
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            ClientError::Timeout(_) => ErrorClass::Timeout,
            ClientError::Connect(_) | ClientError::Status { .. } => ErrorClass::Request,
            ClientError::Decode(_) => ErrorClass::Unexpected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_counts_as_request_failure() {
        let err = ClientError::Status {
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(err.class(), ErrorClass::Request);
        assert_eq!(err.to_string(), "HTTP 500: boom");
        assert_eq!(
            ClientError::Decode("x".into()).class(),
            ErrorClass::Unexpected
        );
    }
}

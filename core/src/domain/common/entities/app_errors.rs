use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Missing or invalid startup configuration. Fatal.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("{operation} timed out after {budget_secs}s")]
    Timeout { operation: String, budget_secs: u64 },

    /// A remote API answered with an error status or could not be reached.
    #[error("{service} error: {message}")]
    Upstream { service: String, message: String },

    #[error("failed to parse {0}")]
    Parse(String),

    #[error("slot starting at {start} is too soon, it must start after {earliest}")]
    TooSoon {
        start: DateTime<Utc>,
        earliest: DateTime<Utc>,
    },

    #[error("scheduling failed: {0}")]
    Scheduling(String),

    #[error("invalid input: {0}")]
    Invalid(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("internal server error")]
    InternalServerError,
}

impl CoreError {
    pub fn upstream(service: &str, message: impl Into<String>) -> Self {
        Self::Upstream {
            service: service.to_string(),
            message: message.into(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

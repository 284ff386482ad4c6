// src/core/error.rs
use thiserror::Error;

pub type CallResult<T> = std::result::Result<T, CallError>;

/// Failure of a single call to the analysis service.
/// Every kind is terminal for that call; nothing retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Service returned error status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for CallError {
    fn from(err: reqwest::Error) -> Self {
        CallError::Transport(err.to_string())
    }
}

impl CallError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Status { .. } => "status",
            Self::Malformed(_) => "malformed",
            Self::InvalidRequest(_) => "invalid_request",
        }
    }
}

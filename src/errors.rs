use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure classes surfaced by the generation and topic gateways.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Config,
    RateLimit,
    Timeout,
    ApiError,
    InvalidResponse,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Config => "config",
            ErrorKind::RateLimit => "rate_limit",
            ErrorKind::Timeout => "timeout",
            ErrorKind::ApiError => "api_error",
            ErrorKind::InvalidResponse => "invalid_response",
        }
    }

    /// HTTP status returned to the caller for this class.
    pub fn http_status(self) -> u16 {
        match self {
            ErrorKind::Config => 503,
            ErrorKind::RateLimit => 429,
            ErrorKind::Timeout => 504,
            ErrorKind::ApiError | ErrorKind::InvalidResponse => 500,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct GenError {
    pub kind: ErrorKind,
    pub message: String,
}

impl GenError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn api(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ApiError, message)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Prompt is required and must be a non-empty string")]
    MissingPrompt,
    #[error("Prompt must be {max} characters or less")]
    PromptTooLong { max: usize },
    #[error("Length must be 'short', 'medium', or 'long'")]
    InvalidLength,
    #[error("Vibe must be 'upbeat', 'chill', or 'mystic'")]
    InvalidVibe,
    #[error("Format must be 'song' or 'poem'")]
    InvalidFormat,
    #[error("Invalid JSON body")]
    MalformedBody,
}

//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AI provider API error: {0}")]
    Api(ApiError),

    #[error("AI provider error: {0}")]
    AiProvider(String),

    #[error("Gateway error (status {status}): {message}")]
    Gateway { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Structured error reported by the AI provider.
///
/// Mirrors the `{"error": {"message", "type", "code"}}` body returned by
/// OpenAI-compatible APIs, plus the HTTP status it arrived with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: Option<u16>,
    pub code: Option<String>,
    pub kind: Option<String>,
    pub message: String,
}

impl ApiError {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: None,
            kind: None,
            message: message.into(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (status {})", self.message, status),
            None => f.write_str(&self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_includes_status() {
        let err = Error::Api(ApiError::new(Some(429), "Rate limit reached"));
        assert_eq!(
            err.to_string(),
            "AI provider API error: Rate limit reached (status 429)"
        );
    }

    #[test]
    fn test_api_error_display_without_status() {
        let err = ApiError::new(None, "Connection error.").with_code("econnreset");
        assert_eq!(err.to_string(), "Connection error.");
        assert_eq!(err.code.as_deref(), Some("econnreset"));
    }
}

//! Errors for non-success API responses.

use std::fmt;

/// A non-2xx XRPC response that is not an authentication failure.
///
/// XRPC error bodies look like `{"error": "InvalidRequest", "message": "..."}`;
/// both fields are optional on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerError {
    pub status: u16,
    /// XRPC error name, e.g. `InvalidRequest` or `RateLimitExceeded`.
    pub error: Option<String>,
    pub message: String,
}

impl ServerError {
    pub fn new(status: u16, error: Option<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            error,
            message: message.into(),
        }
    }

    /// 5xx responses and rate limiting are worth retrying later.
    pub fn is_retryable(&self) -> bool {
        self.status >= 500 || self.status == 429 || self.status == 408
    }

    pub fn user_message(&self) -> String {
        match self.status {
            429 => "Too many requests. Please wait a moment and try again.".to_string(),
            500..=599 => "The server is experiencing issues. Please try again later.".to_string(),
            _ if !self.message.is_empty() => self.message.clone(),
            _ => format!("The server returned an error (HTTP {}).", self.status),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self.status {
            429 => "E_SRV_RATE",
            500..=599 => "E_SRV_5XX",
            _ => "E_SRV_4XX",
        }
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            Some(name) => write!(f, "HTTP {} {}: {}", self.status, name, self.message),
            None => write!(f, "HTTP {}: {}", self.status, self.message),
        }
    }
}

impl std::error::Error for ServerError {}

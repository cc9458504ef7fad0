//! Error category classification for unified error handling.
//!
//! Categories drive how a front end reacts to a failure: show a retry
//! affordance, send the user back to the sign-in screen, or point at the
//! offending input field.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Transport failures (connection, timeout, undecodable response).
    /// Generally transient and retryable.
    Network,

    /// Session expired or missing. Requires re-authentication.
    Auth,

    /// The API answered with a non-success status.
    Server,

    /// Input rejected before any request was made.
    Validation,

    /// Local persistence failures.
    Storage,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient
    /// and the operation can be retried by the user.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Server => "server",
            ErrorCategory::Validation => "validation",
            ErrorCategory::Storage => "storage",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your connection and pull to refresh.",
            ErrorCategory::Auth => "Sign in again.",
            ErrorCategory::Server => "Try again later.",
            ErrorCategory::Validation => "Correct the highlighted fields.",
            ErrorCategory::Storage => "Check that the data directory is writable.",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

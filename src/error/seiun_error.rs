//! Unified error type for the client core.

use std::fmt;

use super::auth::AuthError;
use super::category::ErrorCategory;
use super::network::NetworkError;
use super::server::ServerError;
use super::validation::ValidationError;
use crate::traits::StoreError;

/// Unified error type.
///
/// Repository and session errors reach the view model unchanged as one of
/// these variants; the view model only needs `user_message()` and
/// `requires_reauth()` to decide what to show.
#[derive(Debug, Clone, PartialEq)]
pub enum SeiunError {
    /// Transport failures.
    Network(NetworkError),

    /// Expired, invalid or missing session.
    Auth(AuthError),

    /// Non-success API response.
    Server(ServerError),

    /// Input rejected before any request.
    Validation(ValidationError),

    /// Local persistence failures.
    Storage(StoreError),
}

impl SeiunError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            SeiunError::Network(_) => ErrorCategory::Network,
            SeiunError::Auth(_) => ErrorCategory::Auth,
            SeiunError::Server(_) => ErrorCategory::Server,
            SeiunError::Validation(_) => ErrorCategory::Validation,
            SeiunError::Storage(_) => ErrorCategory::Storage,
        }
    }

    /// Check if retrying the same operation may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            SeiunError::Network(err) => err.is_retryable(),
            SeiunError::Auth(_) => false,
            SeiunError::Server(err) => err.is_retryable(),
            SeiunError::Validation(_) => false,
            SeiunError::Storage(_) => false,
        }
    }

    /// Check if this error should trigger the re-authentication flow.
    pub fn requires_reauth(&self) -> bool {
        match self {
            SeiunError::Auth(err) => err.requires_reauth(),
            _ => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            SeiunError::Network(err) => err.user_message(),
            SeiunError::Auth(err) => err.user_message(),
            SeiunError::Server(err) => err.user_message(),
            SeiunError::Validation(err) => err.user_message(),
            SeiunError::Storage(err) => format!("Could not access local data: {}", err),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            SeiunError::Network(err) => err.error_code(),
            SeiunError::Auth(err) => err.error_code(),
            SeiunError::Server(err) => err.error_code(),
            SeiunError::Validation(err) => err.error_code(),
            SeiunError::Storage(_) => "E_STORE",
        }
    }

    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }
}

impl fmt::Display for SeiunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeiunError::Network(err) => write!(f, "{}", err),
            SeiunError::Auth(err) => write!(f, "{}", err),
            SeiunError::Server(err) => write!(f, "{}", err),
            SeiunError::Validation(err) => write!(f, "{}", err),
            SeiunError::Storage(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SeiunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SeiunError::Network(err) => Some(err),
            SeiunError::Auth(err) => Some(err),
            SeiunError::Server(err) => Some(err),
            SeiunError::Validation(err) => Some(err),
            SeiunError::Storage(err) => Some(err),
        }
    }
}

// ============================================================================
// From implementations for automatic error conversion
// ============================================================================

impl From<NetworkError> for SeiunError {
    fn from(err: NetworkError) -> Self {
        SeiunError::Network(err)
    }
}

impl From<AuthError> for SeiunError {
    fn from(err: AuthError) -> Self {
        SeiunError::Auth(err)
    }
}

impl From<ServerError> for SeiunError {
    fn from(err: ServerError) -> Self {
        SeiunError::Server(err)
    }
}

impl From<ValidationError> for SeiunError {
    fn from(err: ValidationError) -> Self {
        SeiunError::Validation(err)
    }
}

impl From<StoreError> for SeiunError {
    fn from(err: StoreError) -> Self {
        SeiunError::Storage(err)
    }
}

//! Authentication-related error types.

use std::fmt;

/// Authentication-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    /// The access token was rejected (expired or revoked).
    SessionExpired { message: String },

    /// No session is available (user not logged in).
    NotAuthenticated,

    /// Re-authentication was requested but no credential is stored.
    NoCredential,

    /// The service rejected the identifier/password pair.
    InvalidLogin { message: String },

    /// Refreshing the session with the refresh token failed.
    RefreshFailed { message: String },
}

impl AuthError {
    /// Check if this error should send the user through sign-in again.
    pub fn requires_reauth(&self) -> bool {
        matches!(
            self,
            AuthError::SessionExpired { .. }
                | AuthError::NotAuthenticated
                | AuthError::RefreshFailed { .. }
        )
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::SessionExpired { .. } => {
                "Your session has expired. Please sign in again.".to_string()
            }
            AuthError::NotAuthenticated => {
                "You are not signed in. Please sign in to continue.".to_string()
            }
            AuthError::NoCredential => {
                "No saved login was found. Please sign in again.".to_string()
            }
            AuthError::InvalidLogin { message } => format!("Login failed: {}", message),
            AuthError::RefreshFailed { .. } => {
                "Failed to renew your session. Please sign in again.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::SessionExpired { .. } => "E_AUTH_EXPIRED",
            AuthError::NotAuthenticated => "E_AUTH_NOT_AUTH",
            AuthError::NoCredential => "E_AUTH_NO_CRED",
            AuthError::InvalidLogin { .. } => "E_AUTH_LOGIN",
            AuthError::RefreshFailed { .. } => "E_AUTH_REFRESH",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::SessionExpired { message } => write!(f, "Session expired: {}", message),
            AuthError::NotAuthenticated => write!(f, "Not authenticated"),
            AuthError::NoCredential => write!(f, "No stored credential"),
            AuthError::InvalidLogin { message } => write!(f, "Invalid login: {}", message),
            AuthError::RefreshFailed { message } => {
                write!(f, "Session refresh failed: {}", message)
            }
        }
    }
}

impl std::error::Error for AuthError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_reauth() {
        assert!(AuthError::SessionExpired {
            message: "ExpiredToken".to_string()
        }
        .requires_reauth());
        assert!(AuthError::NotAuthenticated.requires_reauth());
        assert!(!AuthError::NoCredential.requires_reauth());
        assert!(!AuthError::InvalidLogin {
            message: "bad password".to_string()
        }
        .requires_reauth());
    }

    #[test]
    fn test_invalid_login_message_includes_reason() {
        let err = AuthError::InvalidLogin {
            message: "Invalid identifier or password".to_string(),
        };
        assert!(err.user_message().contains("Invalid identifier or password"));
        assert_eq!(err.error_code(), "E_AUTH_LOGIN");
    }
}

//! Client-side input validation errors.
//!
//! These are raised before any request is sent.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("'{email}' is not a valid email address")]
    InvalidEmail { email: String },

    #[error("'{handle}' is not a valid handle")]
    InvalidHandle { handle: String },

    #[error("'{host}' is not a valid service host")]
    InvalidServiceHost { host: String },
}

impl ValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::MissingField { field } => format!("Please enter your {}.", field),
            other => format!("{}.", other),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::MissingField { .. } => "E_VAL_MISSING",
            ValidationError::InvalidEmail { .. } => "E_VAL_EMAIL",
            ValidationError::InvalidHandle { .. } => "E_VAL_HANDLE",
            ValidationError::InvalidServiceHost { .. } => "E_VAL_HOST",
        }
    }
}

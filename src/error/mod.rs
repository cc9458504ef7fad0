//! Unified error handling for the client core.
//!
//! | Variant | Raised by | Retryable |
//! |---------|-----------|-----------|
//! | Network | transport failures, timeouts, undecodable bodies | Yes |
//! | Auth | expired/invalid tokens, missing session or credential | No, re-authenticate |
//! | Server | non-success XRPC responses | 5xx and 429 only |
//! | Validation | input checks before any request | No |
//! | Storage | local key-value store | No |
//!
//! Nothing in the crate retries on its own; callers decide.

mod auth;
mod category;
mod network;
mod seiun_error;
mod server;
mod validation;

pub use auth::AuthError;
pub use category::ErrorCategory;
pub use network::{classify_http_error, NetworkError};
pub use seiun_error::SeiunError;
pub use server::ServerError;
pub use validation::ValidationError;

/// Type alias for Results using SeiunError.
pub type SeiunResult<T> = Result<T, SeiunError>;

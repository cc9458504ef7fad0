//! Key-value persistence trait abstraction.
//!
//! The session manager persists sessions and credentials through
//! [`KeyValueStore`]; values are opaque strings (JSON in practice).

use async_trait::async_trait;
use thiserror::Error;

/// Store operation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("Failed to read '{key}': {message}")]
    LoadFailed { key: String, message: String },

    #[error("Failed to write '{key}': {message}")]
    SaveFailed { key: String, message: String },

    #[error("Failed to delete '{key}': {message}")]
    DeleteFailed { key: String, message: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// Trait for a small persistent key-value store.
///
/// # Example
///
/// ```ignore
/// use seiun::traits::KeyValueStore;
///
/// async fn remember<S: KeyValueStore>(store: &S) -> Result<(), StoreError> {
///     store.save("session", r#"{"handle":"alice.bsky.social"}"#).await?;
///     assert!(store.load("session").await?.is_some());
///     store.delete("session").await
/// }
/// ```
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Load the value stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing is stored.
    async fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn save(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Deleting a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

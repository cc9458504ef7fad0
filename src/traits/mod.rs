//! Trait abstractions for dependency injection and testability.
//!
//! - [`HttpClient`] - HTTP transport used by the XRPC client
//! - [`KeyValueStore`] - persistence used by the session manager

pub mod http;
pub mod store;

pub use http::{Headers, HttpClient, HttpError, Response};
pub use store::{KeyValueStore, StoreError};

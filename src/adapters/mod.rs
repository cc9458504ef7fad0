//! Concrete implementations of the trait abstractions in `crate::traits`.
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`FileStore`] - file-per-key JSON storage
//!
//! The [`mock`] submodule provides test doubles for both.

pub mod file_store;
pub mod mock;
pub mod reqwest_http;

pub use file_store::FileStore;
pub use mock::{InMemoryStore, MockHttpClient};
pub use reqwest_http::ReqwestHttpClient;

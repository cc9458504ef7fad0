//! AT Protocol XRPC API: client and wire types.

pub mod client;
pub mod lexicon;
pub mod models;

pub use client::{xrpc_base_url, XrpcClient};
pub use models::{Author, FeedViewPost, Notification, NotificationReason, PostView, SessionResponse};

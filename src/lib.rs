//! seiun - client core for AT Protocol (Bluesky) services
//!
//! Sessions, paginated feeds and feed view models over XRPC. The binary in
//! `main.rs` is a thin CLI on top; everything here is usable from tests or
//! another front end.

pub mod adapters;
pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod feed;
pub mod traits;
pub mod viewmodel;

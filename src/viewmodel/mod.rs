//! UI-facing feed state.
//!
//! A screen owns one [`FeedViewModel`] per feed, calls `load_more`,
//! `refresh` and `retry` on UI events and renders from `subscribe()`.

pub mod feed;
pub mod state;

pub use feed::{ErrorHandler, FeedViewModel};
pub use state::{FeedSnapshot, FeedState, LoadOutcome};

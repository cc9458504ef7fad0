use chrono::{DateTime, Utc};

use crate::api::{Author, FeedViewPost, Notification};

/// Anything that can appear in a paginated feed.
pub trait FeedItem: Clone + Send + Sync + 'static {
    /// Stable identifier used for de-duplication.
    fn id(&self) -> &str;

    fn created_at(&self) -> DateTime<Utc>;

    fn author(&self) -> &Author;

    /// Read state; items without one count as read.
    fn is_read(&self) -> bool {
        true
    }
}

impl FeedItem for Notification {
    fn id(&self) -> &str {
        &self.uri
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.record.created_at
    }

    fn author(&self) -> &Author {
        &self.author
    }

    fn is_read(&self) -> bool {
        self.is_read
    }
}

// Timeline entries are keyed by post URI, so a repost of a post already in
// the list collapses into the first occurrence.
impl FeedItem for FeedViewPost {
    fn id(&self) -> &str {
        &self.post.uri
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.post.record.created_at
    }

    fn author(&self) -> &Author {
        &self.post.author
    }
}

//! Paginated feeds: items, pages, remote sources and the accumulating
//! repository.

pub mod item;
pub mod page;
pub mod repository;
pub mod source;

pub use item::FeedItem;
pub use page::FeedPage;
pub use repository::FeedRepository;
pub use source::{FeedSource, NotificationSource, TimelineSource};

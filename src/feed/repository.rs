//! Cursor-tracking, de-duplicating list over a [`FeedSource`].

use std::collections::HashSet;
use tracing::debug;

use super::item::FeedItem;
use super::page::FeedPage;
use super::source::FeedSource;
use crate::config::DEFAULT_PAGE_LIMIT;
use crate::error::SeiunResult;

/// Accumulated feed state.
///
/// The list only changes after a fetch has completed successfully, so a
/// failed or abandoned request leaves items and cursor exactly as they were.
pub struct FeedRepository<S: FeedSource> {
    source: S,
    limit: u32,
    items: Vec<S::Item>,
    seen: HashSet<String>,
    cursor: Option<String>,
    exhausted: bool,
}

impl<S: FeedSource> FeedRepository<S> {
    pub fn new(source: S) -> Self {
        Self::with_limit(source, DEFAULT_PAGE_LIMIT)
    }

    pub fn with_limit(source: S, limit: u32) -> Self {
        Self {
            source,
            limit: limit.max(1),
            items: Vec::new(),
            seen: HashSet::new(),
            cursor: None,
            exhausted: false,
        }
    }

    pub fn items(&self) -> &[S::Item] {
        &self.items
    }

    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Raw request for the page after `cursor`. Does not touch held state.
    pub async fn fetch_page(&self, cursor: Option<&str>) -> SeiunResult<FeedPage<S::Item>> {
        debug!(
            "Fetching {} page (cursor: {:?}, limit: {})",
            self.source.name(),
            cursor,
            self.limit
        );
        self.source.fetch(cursor, self.limit).await
    }

    /// Fetch the next page and append it.
    ///
    /// Returns the items actually appended (duplicates removed) together
    /// with the new cursor. Once the feed is exhausted this returns an empty
    /// page without a request until [`refresh`](Self::refresh) succeeds.
    pub async fn load_more(&mut self) -> SeiunResult<FeedPage<S::Item>> {
        if self.exhausted {
            debug!("{} exhausted, not fetching", self.source.name());
            return Ok(FeedPage::empty());
        }

        let page = self.fetch_page(self.cursor.as_deref()).await?;

        let mut added = Vec::with_capacity(page.items.len());
        for item in page.items {
            if self.seen.insert(item.id().to_string()) {
                self.items.push(item.clone());
                added.push(item);
            }
        }
        self.exhausted = page.cursor.is_none();
        self.cursor = page.cursor.clone();

        debug!(
            "{}: appended {} items, {} total, exhausted: {}",
            self.source.name(),
            added.len(),
            self.items.len(),
            self.exhausted
        );
        Ok(FeedPage::new(added, page.cursor))
    }

    /// Fetch the first page and replace everything held with it.
    pub async fn refresh(&mut self) -> SeiunResult<FeedPage<S::Item>> {
        let page = self.fetch_page(None).await?;

        let mut seen = HashSet::with_capacity(page.items.len());
        let items: Vec<S::Item> = page
            .items
            .into_iter()
            .filter(|item| seen.insert(item.id().to_string()))
            .collect();

        self.items = items.clone();
        self.seen = seen;
        self.exhausted = page.cursor.is_none();
        self.cursor = page.cursor.clone();

        debug!("{}: refreshed with {} items", self.source.name(), self.items.len());
        Ok(FeedPage::new(items, page.cursor))
    }
}

impl<S: FeedSource> std::fmt::Debug for FeedRepository<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedRepository")
            .field("source", &self.source.name())
            .field("items", &self.items.len())
            .field("cursor", &self.cursor)
            .field("exhausted", &self.exhausted)
            .finish()
    }
}

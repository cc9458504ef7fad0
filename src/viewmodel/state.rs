use crate::error::SeiunError;

/// Pagination state shown by a feed screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedState {
    /// First page or a refresh is in progress.
    Loading,
    /// Items are shown; `exhausted` once the last page has been seen.
    Loaded { exhausted: bool },
    /// The last request failed; already-loaded items stay visible.
    Error { message: String },
}

impl FeedState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FeedState::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, FeedState::Error { .. })
    }
}

/// Everything a subscriber needs to render the feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSnapshot<T> {
    pub state: FeedState,
    pub items: Vec<T>,
    /// Set while a pull-to-refresh is running.
    pub is_refreshing: bool,
}

impl<T> FeedSnapshot<T> {
    pub fn initial() -> Self {
        Self {
            state: FeedState::Loading,
            items: Vec::new(),
            is_refreshing: false,
        }
    }
}

/// Result of a view-model operation.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// A page was fetched; `added` counts the new, de-duplicated items.
    Loaded { added: usize, exhausted: bool },
    /// Nothing left to load; no request was made.
    Exhausted,
    /// Another fetch was in flight; this request was dropped.
    Busy,
    /// The view model has been disposed.
    Disposed,
    Failed(SeiunError),
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }

    pub fn error(&self) -> Option<&SeiunError> {
        match self {
            LoadOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Whether the caller should start the re-authentication flow.
    pub fn requires_reauth(&self) -> bool {
        self.error().is_some_and(SeiunError::requires_reauth)
    }
}

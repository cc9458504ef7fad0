/// One page of a cursor-paginated feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedPage<T> {
    pub items: Vec<T>,
    /// Cursor for the next page; `None` means the feed ends here.
    pub cursor: Option<String>,
}

impl<T> FeedPage<T> {
    pub fn new(items: Vec<T>, cursor: Option<String>) -> Self {
        Self { items, cursor }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            cursor: None,
        }
    }

    pub fn is_last(&self) -> bool {
        self.cursor.is_none()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for FeedPage<T> {
    fn default() -> Self {
        Self::empty()
    }
}

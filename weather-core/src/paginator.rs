use crate::model::ForecastEntry;

/// Entries per page.
pub const PAGE_SIZE: usize = 5;

pub type ForecastPaginator = Paginator<ForecastEntry>;

/// Fixed-size pages over an ordered list with a clamped cursor.
///
/// The cursor always stays within `0..page_count()`; moving past either end
/// is a no-op.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginator<T> {
    items: Vec<T>,
    page: usize,
}

impl<T> Default for Paginator<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> Paginator<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items, page: 0 }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Number of pages; an empty list still has one (empty) page.
    pub fn page_count(&self) -> usize {
        self.last_page() + 1
    }

    fn last_page(&self) -> usize {
        self.items.len().saturating_sub(1) / PAGE_SIZE
    }

    /// Returns `true` if the cursor moved.
    pub fn next_page(&mut self) -> bool {
        if self.page < self.last_page() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Jump to a zero-based page, clamped to the last one.
    pub fn go_to(&mut self, page: usize) {
        self.page = page.min(self.last_page());
    }

    /// Returns `true` if the cursor moved.
    pub fn previous_page(&mut self) -> bool {
        if self.page > 0 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn current_slice(&self) -> &[T] {
        let len = self.items.len();
        let start = (self.page * PAGE_SIZE).min(len);
        let end = ((self.page + 1) * PAGE_SIZE).min(len);
        &self.items[start..end]
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

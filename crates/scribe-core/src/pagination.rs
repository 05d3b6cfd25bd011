//! Fixed-size pagination over ordered listings.

/// Posts per page on every listing view.
pub const PAGE_SIZE: u64 = 10;

/// A bounded slice of an ordered listing plus paging metadata.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Current page number, 1-indexed.
    pub number: u64,
    pub total_pages: u64,
    pub total_items: u64,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            number: 1,
            total_pages: 1,
            total_items: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    pub fn previous_number(&self) -> u64 {
        self.number.saturating_sub(1).max(1)
    }

    pub fn next_number(&self) -> u64 {
        (self.number + 1).min(self.total_pages)
    }
}

/// Number of pages needed for `total_items`. A listing always has at least
/// one page, even when empty.
pub fn total_pages(total_items: u64, page_size: u64) -> u64 {
    total_items.div_ceil(page_size).max(1)
}

/// Clamp a requested page number into the valid range. Requests below 1 go
/// to the first page, requests beyond the end go to the last page.
pub fn clamp_page(requested: u64, total_pages: u64) -> u64 {
    requested.max(1).min(total_pages)
}

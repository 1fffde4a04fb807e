//! Pagination over repository listings.
//!
//! [`PaginationParams`] turns a 1-indexed page number into the offset/limit window
//! a [`Query`](crate::query::Query) understands, and [`Page`] carries one window of
//! results together with the total match count.

use serde::{Deserialize, Serialize};

/// A single page of results.
///
/// # Example
///
/// ```ignore
/// use estate_cms_core::page::{Page, PaginationParams};
///
/// let page = Page::from_window(vec!["b", "c"], 5, &PaginationParams::new(2, 2));
/// assert_eq!(page.next_page, Some(3));
/// assert_eq!(page.previous_page, Some(1));
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// The items contained in this page.
    pub items: Vec<T>,
    /// Total count of matching items across all pages.
    pub count: u64,
    /// The next page number (if more pages exist).
    pub next_page: Option<usize>,
    /// The previous page number (if this is not the first page).
    pub previous_page: Option<usize>,
}

impl<T> Page<T> {
    /// Wraps one already-windowed slice of results.
    ///
    /// `count` is the total number of matches, used to decide whether a next page exists.
    pub fn from_window(items: Vec<T>, count: u64, params: &PaginationParams) -> Self {
        let seen = params.offset().saturating_add(items.len());
        let has_next = !items.is_empty() && (seen as u64) < count;

        Self {
            items,
            count,
            next_page: has_next.then(|| params.page().saturating_add(1)),
            previous_page: (params.page() > 1).then(|| params.page() - 1),
        }
    }

    /// Maps every item, keeping the pagination metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            count: self.count,
            next_page: self.next_page,
            previous_page: self.previous_page,
        }
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            count: 0,
            next_page: None,
            previous_page: None,
        }
    }
}

/// Which page to retrieve and how many items per page.
///
/// Pages are 1-indexed; a page number of 0 is treated as 1 and a page size of 0
/// as 1, so the window is never empty by construction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PaginationParams {
    page: usize,
    per_page: usize,
}

impl PaginationParams {
    /// Default page size.
    pub const DEFAULT_PER_PAGE: usize = 10;

    /// Creates new pagination parameters.
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// The page number (1-indexed).
    pub fn page(&self) -> usize {
        self.page
    }

    /// Number of items per page.
    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Number of items to skip to reach this page.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// Number of items to take for this page.
    pub fn limit(&self) -> usize {
        self.per_page
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self::new(1, Self::DEFAULT_PER_PAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(PaginationParams::new(1, 20).offset(), 0);
        assert_eq!(PaginationParams::new(3, 20).offset(), 40);
    }

    #[test]
    fn zero_page_and_size_are_clamped() {
        let params = PaginationParams::new(0, 0);
        assert_eq!(params.page(), 1);
        assert_eq!(params.per_page(), 1);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn middle_page_links_both_ways() {
        let page = Page::from_window(vec![11, 12], 6, &PaginationParams::new(2, 2));

        assert_eq!(page.count, 6);
        assert_eq!(page.next_page, Some(3));
        assert_eq!(page.previous_page, Some(1));
    }

    #[test]
    fn last_page_has_no_next() {
        let page = Page::from_window(vec![5, 6], 6, &PaginationParams::new(3, 2));

        assert_eq!(page.next_page, None);
        assert_eq!(page.previous_page, Some(2));
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let page: Page<i32> = Page::from_window(vec![], 3, &PaginationParams::new(9, 2));

        assert!(page.items.is_empty());
        assert_eq!(page.next_page, None);
        assert_eq!(page.previous_page, Some(8));
    }
}

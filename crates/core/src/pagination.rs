//! Client-side pagination.
//!
//! The product API returns the whole collection, so paging happens here.
//! A [`Paginator`] lives for one listing session and tracks the page size,
//! the current page and the derived page count.
//!
//! Changing the page size always returns to the first page, while a change
//! in the number of items (a new search, a deletion) only clamps the current
//! page so it stays within range.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

/// Page size used until the user picks another one.
pub const DEFAULT_ITEMS_PER_PAGE: NonZeroUsize = match NonZeroUsize::new(5) {
    Some(n) => n,
    None => unreachable!(),
};

/// Page state for a listing.
///
/// After [`set_items_per_page`](Self::set_items_per_page) or
/// [`recalculate_total_pages`](Self::recalculate_total_pages) the current
/// page is always within `1..=max(total_pages, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginator {
    items_per_page: NonZeroUsize,
    current_page: usize,
    total_pages: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}

impl Paginator {
    /// Create a paginator on page 1 with no pages computed yet.
    #[must_use]
    pub const fn new(items_per_page: NonZeroUsize) -> Self {
        Self {
            items_per_page,
            current_page: 1,
            total_pages: 0,
        }
    }

    /// Number of items shown per page.
    #[must_use]
    pub const fn items_per_page(&self) -> NonZeroUsize {
        self.items_per_page
    }

    /// The 1-based page currently shown.
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// Page count from the last recalculation.
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Change the page size, recompute the page count and go back to page 1.
    pub const fn set_items_per_page(&mut self, size: NonZeroUsize, total_items: usize) {
        self.items_per_page = size;
        self.recalculate_total_pages(total_items);
        self.current_page = 1;
    }

    /// Recompute the page count for `total_items`.
    ///
    /// Pulls the current page back to the last page when it fell out of
    /// range; never resets it otherwise.
    pub const fn recalculate_total_pages(&mut self, total_items: usize) {
        self.total_pages = total_items.div_ceil(self.items_per_page.get());
        if self.current_page > self.total_pages {
            let last = if self.total_pages > 1 {
                self.total_pages
            } else {
                1
            };
            self.set_current_page(last);
        }
    }

    /// Jump to `page` without any range check.
    pub const fn set_current_page(&mut self, page: usize) {
        self.current_page = page;
    }

    /// Whether there is a page before the current one.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether there is a page after the current one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Go back one page if possible. Returns whether the page changed.
    pub const fn previous_page(&mut self) -> bool {
        if self.has_previous() {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Go forward one page if possible. Returns whether the page changed.
    pub const fn next_page(&mut self) -> bool {
        if self.has_next() {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// The items on the current page.
    ///
    /// Out-of-range pages yield an empty slice.
    #[must_use]
    pub fn paginate<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let size = self.items_per_page.get();
        let start = self.current_page.saturating_sub(1).saturating_mul(size);
        let end = start.saturating_add(size).min(items.len());
        items.get(start..end).unwrap_or_default()
    }

    /// 1-based position of the first item on the current page.
    #[must_use]
    pub const fn start_index(&self) -> usize {
        self.current_page
            .saturating_sub(1)
            .saturating_mul(self.items_per_page.get())
            .saturating_add(1)
    }

    /// 1-based position of the last item on the current page, given how
    /// many items the page shows.
    ///
    /// Equals `start_index() - 1` for an empty page.
    #[must_use]
    pub const fn end_index(&self, shown: usize) -> usize {
        self.start_index().saturating_add(shown).saturating_sub(1)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn items(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn test_defaults() {
        let paginator = Paginator::default();
        assert_eq!(paginator.items_per_page().get(), 5);
        assert_eq!(paginator.current_page(), 1);
        assert_eq!(paginator.total_pages(), 0);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let mut paginator = Paginator::default();
        for (total, expected) in [(11, 3), (20, 4), (0, 0), (1, 1), (5, 1), (6, 2)] {
            paginator.recalculate_total_pages(total);
            assert_eq!(paginator.total_pages(), expected, "{total} items");
        }
    }

    #[test]
    fn test_set_items_per_page_resets_to_first_page() {
        let mut paginator = Paginator::default();
        paginator.recalculate_total_pages(10);
        paginator.set_current_page(3);

        paginator.set_items_per_page(size(5), 10);
        assert_eq!(paginator.current_page(), 1);
        assert_eq!(paginator.total_pages(), 2);
    }

    #[test]
    fn test_recalculate_clamps_instead_of_resetting() {
        let mut paginator = Paginator::default();
        paginator.recalculate_total_pages(10);
        paginator.set_current_page(3);

        paginator.recalculate_total_pages(10);
        assert_eq!(paginator.current_page(), 2);
    }

    #[test]
    fn test_recalculate_keeps_valid_page() {
        let mut paginator = Paginator::default();
        paginator.recalculate_total_pages(20);
        paginator.set_current_page(3);

        paginator.recalculate_total_pages(15);
        assert_eq!(paginator.current_page(), 3);
    }

    #[test]
    fn test_recalculate_with_no_items_keeps_page_one() {
        let mut paginator = Paginator::default();
        paginator.recalculate_total_pages(20);
        paginator.set_current_page(4);

        paginator.recalculate_total_pages(0);
        assert_eq!(paginator.total_pages(), 0);
        assert_eq!(paginator.current_page(), 1);
        assert!(paginator.paginate::<usize>(&[]).is_empty());
    }

    #[test]
    fn test_recalculate_is_idempotent() {
        let mut once = Paginator::default();
        once.recalculate_total_pages(30);
        once.set_current_page(6);
        let mut twice = once;

        once.recalculate_total_pages(12);
        twice.recalculate_total_pages(12);
        twice.recalculate_total_pages(12);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_page_size_change_then_smaller_count_clamps() {
        let mut paginator = Paginator::default();
        paginator.set_items_per_page(size(10), 50);
        paginator.set_current_page(5);

        paginator.recalculate_total_pages(12);
        assert_eq!(paginator.total_pages(), 2);
        assert_eq!(paginator.current_page(), 2);
    }

    #[test]
    fn test_paginate_second_page() {
        let mut paginator = Paginator::default();
        let data = items(20);
        paginator.recalculate_total_pages(data.len());
        paginator.set_current_page(2);

        assert_eq!(paginator.paginate(&data), &[5, 6, 7, 8, 9]);
        assert_eq!(paginator.start_index(), 6);
        assert_eq!(paginator.end_index(5), 10);
    }

    #[test]
    fn test_paginate_last_partial_page() {
        let mut paginator = Paginator::default();
        let data = items(11);
        paginator.recalculate_total_pages(data.len());
        paginator.set_current_page(3);

        assert_eq!(paginator.paginate(&data), &[10]);
        assert_eq!(paginator.end_index(1), 11);
    }

    #[test]
    fn test_paginate_out_of_range_is_empty() {
        let mut paginator = Paginator::default();
        let data = items(7);
        paginator.set_current_page(9);
        assert!(paginator.paginate(&data).is_empty());

        paginator.set_current_page(usize::MAX);
        assert!(paginator.paginate(&data).is_empty());

        paginator.set_current_page(0);
        assert_eq!(paginator.paginate(&data), &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_start_index_out_of_range() {
        let mut paginator = Paginator::default();
        paginator.set_current_page(usize::MAX);
        assert!(paginator.paginate(&items(3)).is_empty());
        assert_eq!(paginator.start_index(), usize::MAX);
        assert_eq!(paginator.end_index(0), usize::MAX - 1);
        assert_eq!(paginator.end_index(5), usize::MAX - 1);

        paginator.set_current_page(0);
        assert_eq!(paginator.start_index(), 1);
        assert_eq!(paginator.end_index(0), 0);
    }

    #[test]
    fn test_paginate_never_exceeds_page_size() {
        for n in [1, 3, 7, 10] {
            let mut paginator = Paginator::new(size(n));
            let data = items(23);
            paginator.recalculate_total_pages(data.len());
            for page in 1..=paginator.total_pages() + 1 {
                paginator.set_current_page(page);
                assert!(paginator.paginate(&data).len() <= n);
            }
        }
    }

    #[test]
    fn test_navigation_guards() {
        let mut paginator = Paginator::default();
        paginator.recalculate_total_pages(12);

        assert!(!paginator.has_previous());
        assert!(!paginator.previous_page());
        assert_eq!(paginator.current_page(), 1);

        assert!(paginator.next_page());
        assert!(paginator.next_page());
        assert!(!paginator.next_page());
        assert_eq!(paginator.current_page(), 3);
        assert!(!paginator.has_next());

        assert!(paginator.previous_page());
        assert_eq!(paginator.current_page(), 2);
    }

    #[test]
    fn test_round_trips_through_json() {
        let mut paginator = Paginator::new(size(10));
        paginator.recalculate_total_pages(35);
        paginator.set_current_page(3);

        let json = serde_json::to_string(&paginator).unwrap();
        let back: Paginator = serde_json::from_str(&json).unwrap();
        assert_eq!(back, paginator);
    }
}

//! Product listing session.
//!
//! Holds what the listing page remembers between requests: the search term
//! and the paginator. Every event re-runs the filter over the latest
//! product snapshot before touching the paginator, so page counts always
//! reflect what the user can actually see.

use std::num::NonZeroUsize;

use finprod_core::{Paginator, Product, filter_products};
use serde::{Deserialize, Serialize};

/// Serializable listing state, stored in the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingState {
    /// Current search term.
    pub search: String,
    /// Page state.
    pub paginator: Paginator,
}

impl ListingState {
    /// Fresh state starting with the given page size.
    #[must_use]
    pub fn with_page_size(size: NonZeroUsize) -> Self {
        Self {
            search: String::new(),
            paginator: Paginator::new(size),
        }
    }
}

/// One rendered page of the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage<'a> {
    /// Products on the current page.
    pub rows: Vec<&'a Product>,
    /// Number of products matching the search.
    pub total_matches: usize,
    /// 1-based current page.
    pub current_page: usize,
    /// Page count.
    pub total_pages: usize,
    /// Page size.
    pub items_per_page: usize,
    /// 1-based position of the first row.
    pub start_index: usize,
    /// 1-based position of the last row.
    pub end_index: usize,
    /// Whether a previous page exists.
    pub has_previous: bool,
    /// Whether a next page exists.
    pub has_next: bool,
}

/// Listing event handlers over a [`ListingState`].
#[derive(Debug)]
pub struct ProductListing<'s> {
    state: &'s mut ListingState,
}

impl<'s> ProductListing<'s> {
    /// Drive `state`.
    pub const fn new(state: &'s mut ListingState) -> Self {
        Self { state }
    }

    /// Replace the search term.
    ///
    /// The paginator is adjusted on the next [`page`](Self::page) call,
    /// which clamps rather than resets.
    pub fn search(&mut self, term: &str) {
        term.clone_into(&mut self.state.search);
    }

    /// Change the page size and return to the first page.
    pub fn change_page_size(&mut self, size: NonZeroUsize, products: &[Product]) {
        let matches = filter_products(products, &self.state.search).len();
        self.state.paginator.set_items_per_page(size, matches);
    }

    /// Go to the next page if there is one.
    pub fn next_page(&mut self, products: &[Product]) -> bool {
        self.refresh_totals(products);
        self.state.paginator.next_page()
    }

    /// Go to the previous page if there is one.
    pub fn previous_page(&mut self, products: &[Product]) -> bool {
        self.refresh_totals(products);
        self.state.paginator.previous_page()
    }

    /// Filter, recalculate and slice `products` for display.
    pub fn page<'a>(&mut self, products: &'a [Product]) -> ListingPage<'a> {
        let filtered = filter_products(products, &self.state.search);
        let paginator = &mut self.state.paginator;
        paginator.recalculate_total_pages(filtered.len());

        let rows = paginator.paginate(&filtered).to_vec();
        let start_index = paginator.start_index();
        let end_index = paginator.end_index(rows.len());

        ListingPage {
            total_matches: filtered.len(),
            current_page: paginator.current_page(),
            total_pages: paginator.total_pages(),
            items_per_page: paginator.items_per_page().get(),
            start_index,
            end_index,
            has_previous: paginator.has_previous(),
            has_next: paginator.has_next(),
            rows,
        }
    }

    fn refresh_totals(&mut self, products: &[Product]) {
        let matches = filter_products(products, &self.state.search).len();
        self.state.paginator.recalculate_total_pages(matches);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use finprod_core::ProductId;

    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn catalog(n: usize) -> Vec<Product> {
        (0..n)
            .map(|i| Product {
                id: ProductId::parse(&format!("prd-{i:03}")).unwrap(),
                name: if i % 2 == 0 {
                    format!("Tarjeta {i}")
                } else {
                    format!("Cuenta {i}")
                },
                description: format!("Producto financiero numero {i}"),
                logo: "logo.png".to_string(),
                date_release: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                date_revision: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            })
            .collect()
    }

    fn row_ids(page: &ListingPage<'_>) -> Vec<String> {
        page.rows.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_first_page_of_fresh_state() {
        let products = catalog(12);
        let mut state = ListingState::default();
        let page = ProductListing::new(&mut state).page(&products);

        assert_eq!(page.rows.len(), 5);
        assert_eq!(page.total_matches, 12);
        assert_eq!(page.total_pages, 3);
        assert_eq!((page.start_index, page.end_index), (1, 5));
        assert!(!page.has_previous);
        assert!(page.has_next);
    }

    #[test]
    fn test_navigation_stops_at_the_edges() {
        let products = catalog(12);
        let mut state = ListingState::default();
        let mut listing = ProductListing::new(&mut state);

        assert!(!listing.previous_page(&products));
        assert!(listing.next_page(&products));
        assert!(listing.next_page(&products));
        assert!(!listing.next_page(&products));

        let page = listing.page(&products);
        assert_eq!(page.current_page, 3);
        assert_eq!(row_ids(&page), ["prd-010", "prd-011"]);
        assert_eq!((page.start_index, page.end_index), (11, 12));
    }

    #[test]
    fn test_search_clamps_current_page() {
        let products = catalog(20);
        let mut state = ListingState::default();
        let mut listing = ProductListing::new(&mut state);
        listing.next_page(&products);
        listing.next_page(&products);
        listing.next_page(&products);
        assert_eq!(listing.page(&products).current_page, 4);

        // 10 products named "Tarjeta" -> 2 pages
        listing.search("TARJETA");
        let page = listing.page(&products);
        assert_eq!(page.total_matches, 10);
        assert_eq!(page.current_page, 2);
        assert!(page.rows.iter().all(|p| p.name.starts_with("Tarjeta")));
    }

    #[test]
    fn test_page_size_change_resets_to_first_page() {
        let products = catalog(30);
        let mut state = ListingState::default();
        let mut listing = ProductListing::new(&mut state);
        listing.next_page(&products);
        listing.next_page(&products);

        listing.change_page_size(size(10), &products);
        let page = listing.page(&products);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.rows.len(), 10);
    }

    #[test]
    fn test_page_size_uses_filtered_count() {
        let products = catalog(30);
        let mut state = ListingState::default();
        let mut listing = ProductListing::new(&mut state);
        listing.search("cuenta");
        listing.change_page_size(size(10), &products);

        assert_eq!(state.paginator.total_pages(), 2);
    }

    #[test]
    fn test_deleting_last_item_on_last_page_moves_back() {
        let mut products = catalog(11);
        let mut state = ListingState::default();
        let mut listing = ProductListing::new(&mut state);
        listing.next_page(&products);
        listing.next_page(&products);
        assert_eq!(row_ids(&listing.page(&products)), ["prd-010"]);

        products.retain(|p| p.id != "prd-010");
        let page = listing.page(&products);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.rows.len(), 5);
    }

    #[test]
    fn test_empty_catalog() {
        let mut state = ListingState::default();
        let page = ProductListing::new(&mut state).page(&[]);

        assert!(page.rows.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.current_page, 1);
        assert_eq!((page.start_index, page.end_index), (1, 0));
        assert!(!page.has_next);
    }

    #[test]
    fn test_state_survives_json_round_trip() {
        let products = catalog(12);
        let mut state = ListingState::with_page_size(size(10));
        let mut listing = ProductListing::new(&mut state);
        listing.search("numero");
        listing.next_page(&products);

        let json = serde_json::to_value(&state).unwrap();
        let back: ListingState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
        assert_eq!(back.paginator.current_page(), 2);
    }
}

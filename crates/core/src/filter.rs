//! Product search.

use crate::types::Product;

/// Keep the products whose name or description contains `term`,
/// ignoring case.
///
/// Order is preserved and the input is never modified. An empty term
/// matches every product.
#[must_use]
pub fn filter_products<'a>(products: &'a [Product], term: &str) -> Vec<&'a Product> {
    let needle = term.to_lowercase();
    products
        .iter()
        .filter(|product| product.matches_lowercase(&needle))
        .collect()
}

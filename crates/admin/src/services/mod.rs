//! Business logic services for admin.
//!
//! # Services
//!
//! - `listing` - Search and pagination state of the product listing

pub mod listing;

pub use listing::{ListingPage, ListingState, ProductListing};

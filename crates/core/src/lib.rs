//! Finprod Core - Shared product types and listing logic.
//!
//! This crate provides the pieces used by every Finprod component:
//! - `admin` - Server-rendered management panel
//! - `cli` - Command-line access to the product API
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. Every operation here is synchronous and total.
//!
//! # Modules
//!
//! - [`types`] - `Product` and the validated `ProductId` newtype
//! - [`filter`] - Case-insensitive search over name and description
//! - [`pagination`] - Client-side page slicing with current-page tracking
//! - [`validation`] - Product form validators
//! - [`dates`] - Calendar date parsing and formatting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod dates;
pub mod filter;
pub mod pagination;
pub mod types;
pub mod validation;

pub use dates::DateError;
pub use filter::filter_products;
pub use pagination::{DEFAULT_ITEMS_PER_PAGE, Paginator};
pub use types::*;
pub use validation::{FieldError, ProductDraft, ValidationErrors};

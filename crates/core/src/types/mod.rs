//! Core types for Finprod.

pub mod id;
pub mod product;

pub use id::{ProductId, ProductIdError};
pub use product::Product;

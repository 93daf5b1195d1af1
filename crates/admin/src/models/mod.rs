//! Session-stored models for admin.

pub mod session;

pub use session::{Flash, FlashKind, keys};

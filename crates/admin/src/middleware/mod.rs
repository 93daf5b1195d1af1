//! HTTP middleware stack for the panel.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, HTTP transactions)
//! 2. `TraceLayer` (request tracing with status and latency)
//! 3. Session layer (tower-sessions with in-memory store)

pub mod session;

pub use session::{create_session_layer, load_listing, save_listing, set_flash, take_flash};

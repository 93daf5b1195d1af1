//! Session middleware configuration for the panel.
//!
//! Sets up memory-backed sessions using tower-sessions. Sessions only hold
//! listing state and pending alerts, so losing them on restart just returns
//! users to the first page.

use std::num::NonZeroUsize;

use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use crate::config::AdminConfig;
use crate::models::{Flash, keys};
use crate::services::ListingState;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "finprod_session";

/// Session expiry time in seconds (8 hours of inactivity).
const SESSION_EXPIRY_SECONDS: i64 = 8 * 60 * 60;

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(config: &AdminConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Load the listing state, starting a fresh one with `page_size` if the
/// session has none.
///
/// # Errors
///
/// Returns an error if the session store fails or the stored value no
/// longer deserializes.
pub async fn load_listing(
    session: &Session,
    page_size: NonZeroUsize,
) -> Result<ListingState, tower_sessions::session::Error> {
    Ok(session
        .get::<ListingState>(keys::PRODUCT_LISTING)
        .await?
        .unwrap_or_else(|| ListingState::with_page_size(page_size)))
}

/// Persist the listing state.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn save_listing(
    session: &Session,
    state: &ListingState,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::PRODUCT_LISTING, state).await
}

/// Queue an alert for the next page.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn set_flash(session: &Session, flash: Flash) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::FLASH, flash).await
}

/// Take the pending alert, if any.
///
/// Store failures are logged and treated as "no alert" so a broken
/// session never blocks rendering.
pub async fn take_flash(session: &Session) -> Option<Flash> {
    match session.remove::<Flash>(keys::FLASH).await {
        Ok(flash) => flash,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read flash from session");
            None
        }
    }
}

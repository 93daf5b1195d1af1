//! Application state shared across handlers.

use std::sync::Arc;

use crate::api::ProductApiClient;
use crate::config::AdminConfig;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    api: ProductApiClient,
}

impl AppState {
    /// Build state from configuration.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let api = ProductApiClient::new(&config.products_api);
        Self {
            inner: Arc::new(AppStateInner { config, api }),
        }
    }

    /// Panel configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Product API client.
    #[must_use]
    pub fn api(&self) -> &ProductApiClient {
        &self.inner.api
    }
}

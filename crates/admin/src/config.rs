//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PRODUCTS_API_URL` - Base URL of the product collection endpoint
//!   (e.g., `https://api.example.com/bp/products`)
//! - `PRODUCTS_AUTHOR_ID` - Value sent in the `authorId` header on every request
//!
//! ## Optional
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `ADMIN_BASE_URL` - Public URL of the panel (default: `http://{host}:{port}`)
//! - `PRODUCTS_PAGE_SIZE` - Initial page size, one of 5, 10, 20 (default: 5)
//! - `LOG_FORMAT` - `json` for structured logs, anything else for text
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 1.0)

use std::net::{IpAddr, SocketAddr};
use std::num::NonZeroUsize;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

/// Page sizes offered in the listing.
pub const PAGE_SIZE_CHOICES: [usize; 3] = [5, 10, 20];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the panel
    pub base_url: String,
    /// Upstream product API
    pub products_api: ProductApiConfig,
    /// Page size a new listing session starts with
    pub default_page_size: NonZeroUsize,
    /// Emit JSON logs instead of text
    pub json_logs: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Product API configuration.
///
/// Implements `Debug` manually to redact the author id, which acts as the
/// API credential.
#[derive(Clone)]
pub struct ProductApiConfig {
    /// Collection endpoint; item operations hang off it
    pub base_url: Url,
    /// `authorId` header value
    pub author_id: SecretString,
}

impl std::fmt::Debug for ProductApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductApiConfig")
            .field("base_url", &self.base_url.as_str())
            .field("author_id", &"[REDACTED]")
            .finish()
    }
}

impl ProductApiConfig {
    /// Load the product API settings from the environment.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is missing or the URL is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_vars(&env_var)
    }

    /// Load the product API settings through a variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is missing or the URL is invalid.
    pub fn from_vars(vars: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = get_required(vars, "PRODUCTS_API_URL")?;
        let base_url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::InvalidEnvVar("PRODUCTS_API_URL".to_string(), e.to_string()))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEnvVar(
                "PRODUCTS_API_URL".to_string(),
                format!("unsupported scheme '{}'", base_url.scheme()),
            ));
        }

        let author_id = get_required(vars, "PRODUCTS_AUTHOR_ID")?;
        if author_id.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "PRODUCTS_AUTHOR_ID".to_string(),
                "must not be blank".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            author_id: SecretString::from(author_id),
        })
    }

    /// The `authorId` header value.
    #[must_use]
    pub fn author_id(&self) -> &str {
        self.author_id.expose_secret()
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_vars(&env_var)
    }

    /// Load configuration through a variable lookup instead of the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_vars(vars: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = get_or_default(vars, "ADMIN_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_string(), e.to_string()))?;
        let port = get_or_default(vars, "ADMIN_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_PORT".to_string(), e.to_string()))?;
        let base_url = vars("ADMIN_BASE_URL").unwrap_or_else(|| format!("http://{host}:{port}"));

        let products_api = ProductApiConfig::from_vars(vars)?;
        let default_page_size = parse_page_size(&get_or_default(vars, "PRODUCTS_PAGE_SIZE", "5"))?;
        let json_logs = vars("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json"));

        let sentry_dsn = vars("SENTRY_DSN");
        let sentry_environment = vars("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = vars("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = vars("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            base_url,
            products_api,
            default_page_size,
            json_logs,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the panel is served over HTTPS (enables secure cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get a required variable.
fn get_required(vars: &dyn Fn(&str) -> Option<String>, key: &str) -> Result<String, ConfigError> {
    vars(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a variable with a default value.
fn get_or_default(vars: &dyn Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    vars(key).unwrap_or_else(|| default.to_string())
}

/// Parse a page size and check it is one of the offered choices.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for non-numeric or unsupported sizes.
pub fn parse_page_size(raw: &str) -> Result<NonZeroUsize, ConfigError> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|n| PAGE_SIZE_CHOICES.contains(n))
        .and_then(NonZeroUsize::new)
        .ok_or_else(|| {
            ConfigError::InvalidEnvVar(
                "PRODUCTS_PAGE_SIZE".to_string(),
                format!("'{raw}' is not one of {PAGE_SIZE_CHOICES:?}"),
            )
        })
}

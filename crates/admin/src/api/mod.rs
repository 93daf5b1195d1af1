//! Product API client.
//!
//! The upstream API exposes a single collection endpoint and owns every
//! product; the panel keeps no local copy.
//!
//! ```text
//! GET    {base}                   - all products
//! POST   {base}                   - create (JSON body)
//! PUT    {base}                   - update (JSON body)
//! DELETE {base}?id={id}           - delete
//! GET    {base}/verification?id=  - whether an id is taken (JSON bool)
//! ```
//!
//! Every request carries the configured `authorId` header.
//!
//! # Example
//!
//! ```rust,ignore
//! use finprod_admin::api::ProductApiClient;
//!
//! let client = ProductApiClient::new(&config.products_api);
//!
//! let products = client.get_products().await?;
//! if !client.product_exists("trj-crd").await? {
//!     client.add_product(&product).await?;
//! }
//! ```

mod client;

pub use client::{AUTHOR_ID_HEADER, ProductApiClient};

use thiserror::Error;

/// Errors that can occur when talking to the product API.
#[derive(Debug, Error)]
pub enum ProductApiError {
    /// HTTP request failed or the body could not be decoded.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API rejected the credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The addressed product does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success status.
    #[error("API returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_api_error_display() {
        let err = ProductApiError::NotFound("trj-crd".to_string());
        assert_eq!(err.to_string(), "Not found: trj-crd");
    }

    #[test]
    fn test_status_error_display() {
        let err = ProductApiError::Status {
            status: 400,
            body: "Duplicate identifier".to_string(),
        };
        assert_eq!(err.to_string(), "API returned 400: Duplicate identifier");
    }

    #[test]
    fn test_unauthorized_error() {
        let err = ProductApiError::Unauthorized("Invalid authorId".to_string());
        assert_eq!(err.to_string(), "Unauthorized: Invalid authorId");
    }
}

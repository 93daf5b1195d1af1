//! HTTP client for the product API.

use std::sync::Arc;

use finprod_core::{Product, ProductId};
use reqwest::StatusCode;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, instrument, warn};

use super::ProductApiError;
use crate::config::ProductApiConfig;

/// Header carrying the author credential.
pub const AUTHOR_ID_HEADER: &str = "authorId";

/// Longest response body kept in error messages.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Product API client.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct ProductApiClient {
    inner: Arc<ProductApiClientInner>,
}

struct ProductApiClientInner {
    client: reqwest::Client,
    base_url: String,
    author_id: String,
}

impl std::fmt::Debug for ProductApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductApiClient")
            .field("base_url", &self.inner.base_url)
            .field("author_id", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// Some API versions wrap payloads as `{ "message": ..., "data": ... }`,
/// others return them bare.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

impl ProductApiClient {
    /// Create a new client from configuration.
    #[must_use]
    pub fn new(config: &ProductApiConfig) -> Self {
        Self {
            inner: Arc::new(ProductApiClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
                author_id: config.author_id().to_string(),
            }),
        }
    }

    /// The collection endpoint.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.inner
            .client
            .request(method, url)
            .header(AUTHOR_ID_HEADER, &self.inner.author_id)
    }

    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
        resource: &str,
    ) -> Result<T, ProductApiError> {
        let response = check_status(response, resource).await?;
        let envelope: Envelope<T> = response.json().await?;
        Ok(envelope.into_inner())
    }

    // =========================================================================
    // Product methods
    // =========================================================================

    /// Fetch every product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API answers with a
    /// non-success status.
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> Result<Vec<Product>, ProductApiError> {
        let response = self
            .request(reqwest::Method::GET, &self.inner.base_url)
            .send()
            .await?;
        let products: Vec<Product> = Self::read_json(response, "products").await?;
        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }

    /// Find a product by id.
    ///
    /// The API has no item endpoint, so this scans the full collection.
    ///
    /// # Errors
    ///
    /// Returns an error if fetching the collection fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: &str) -> Result<Option<Product>, ProductApiError> {
        let products = self.get_products().await?;
        Ok(products.into_iter().find(|product| product.id == id))
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects the product.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn add_product(&self, product: &Product) -> Result<Product, ProductApiError> {
        let response = self
            .request(reqwest::Method::POST, &self.inner.base_url)
            .json(product)
            .send()
            .await?;
        Self::read_json(response, product.id.as_str()).await
    }

    /// Replace an existing product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects the update.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn update_product(&self, product: &Product) -> Result<Product, ProductApiError> {
        let response = self
            .request(reqwest::Method::PUT, &self.inner.base_url)
            .json(product)
            .send()
            .await?;
        Self::read_json(response, product.id.as_str()).await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API answers with a
    /// non-success status.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), ProductApiError> {
        let response = self
            .request(reqwest::Method::DELETE, &self.inner.base_url)
            .query(&[("id", id.as_str())])
            .send()
            .await?;
        check_status(response, id.as_str()).await?;
        Ok(())
    }

    /// Whether an id is already taken.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a boolean.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product_exists(&self, id: &str) -> Result<bool, ProductApiError> {
        let url = format!("{}/verification", self.inner.base_url);
        let response = self
            .request(reqwest::Method::GET, &url)
            .query(&[("id", id)])
            .send()
            .await?;
        Self::read_json(response, id).await
    }
}

/// Map non-success statuses to [`ProductApiError`].
async fn check_status(
    response: reqwest::Response,
    resource: &str,
) -> Result<reqwest::Response, ProductApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ProductApiError::Unauthorized(
            "Product API rejected the authorId header".to_string(),
        )),
        StatusCode::NOT_FOUND => Err(ProductApiError::NotFound(resource.to_string())),
        _ => {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), resource, "Product API error response");
            Err(ProductApiError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            })
        }
    }
}

//! Product management commands.
//!
//! # Usage
//!
//! ```bash
//! # Second page of products matching "tarjeta", 10 per page
//! finprod list --search tarjeta --per-page 10 --page 2
//!
//! # Create a product
//! finprod create --id trj-crd --name "Tarjeta de credito" \
//!     --description "Tarjeta de consumo" --logo https://example.com/logo.png \
//!     --release 2030-01-01 --revision 2031-01-01
//! ```
//!
//! # Environment Variables
//!
//! - `PRODUCTS_API_URL` - Base URL of the product collection endpoint
//! - `PRODUCTS_AUTHOR_ID` - `authorId` header value

use std::fmt::Write as _;
use std::num::NonZeroUsize;

use clap::Args;
use finprod_admin::{ConfigError, ProductApiClient, ProductApiConfig, ProductApiError};
use finprod_core::{
    Paginator, Product, ProductDraft, ProductId, ProductIdError, ValidationErrors, dates,
    filter_products,
};
use thiserror::Error;

/// Errors that can occur during product commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Product API request failed.
    #[error("Product API error: {0}")]
    Api(#[from] ProductApiError),

    /// Malformed product id.
    #[error("Invalid product ID: {0}")]
    InvalidId(#[from] ProductIdError),

    /// Product fields failed validation.
    #[error("Invalid product: {0}")]
    Validation(#[from] ValidationErrors),

    /// No product with this id.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// Id already used by another product.
    #[error("Product ID already in use: {0}")]
    IdTaken(String),
}

/// Product fields for `create` and `update`.
#[derive(Debug, Args)]
pub struct ProductArgs {
    /// Product ID (3-10 characters)
    #[arg(long)]
    pub id: String,

    /// Product name (5-100 characters)
    #[arg(long)]
    pub name: String,

    /// Description (10-200 characters)
    #[arg(long)]
    pub description: String,

    /// Logo URL
    #[arg(long)]
    pub logo: String,

    /// Release date (YYYY-MM-DD, today or later)
    #[arg(long)]
    pub release: String,

    /// Revision date (YYYY-MM-DD, after the release date)
    #[arg(long)]
    pub revision: String,
}

impl From<ProductArgs> for ProductDraft {
    fn from(args: ProductArgs) -> Self {
        Self {
            id: args.id,
            name: args.name,
            description: args.description,
            logo: args.logo,
            date_release: args.release,
            date_revision: args.revision,
        }
    }
}

fn client() -> Result<ProductApiClient, CommandError> {
    let config = ProductApiConfig::from_env()?;
    Ok(ProductApiClient::new(&config))
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

// =============================================================================
// Commands
// =============================================================================

/// Render one page of products.
///
/// # Errors
///
/// Returns an error if configuration is missing or the API request fails.
pub async fn list(
    search: &str,
    per_page: NonZeroUsize,
    page: NonZeroUsize,
) -> Result<String, CommandError> {
    let products = client()?.get_products().await?;
    tracing::debug!(count = products.len(), "Fetched products");
    Ok(render_page(&products, search, per_page, page))
}

/// Show a single product.
///
/// # Errors
///
/// Returns `CommandError::NotFound` if no product has this id.
pub async fn show(id: &str) -> Result<String, CommandError> {
    let product = client()?
        .get_product(id)
        .await?
        .ok_or_else(|| CommandError::NotFound(id.to_string()))?;
    Ok(render_product(&product))
}

/// Whether a product id is taken.
///
/// # Errors
///
/// Returns an error if configuration is missing or the API request fails.
pub async fn exists(id: &str) -> Result<bool, CommandError> {
    Ok(client()?.product_exists(id).await?)
}

/// Validate and create a product.
///
/// # Errors
///
/// Returns an error if validation fails, the id is taken, or the API
/// rejects the product.
pub async fn create(args: ProductArgs) -> Result<String, CommandError> {
    let product = ProductDraft::from(args).validate(today())?;
    let client = client()?;

    if client.product_exists(product.id.as_str()).await? {
        return Err(CommandError::IdTaken(product.id.to_string()));
    }

    let created = client.add_product(&product).await?;
    tracing::info!(product_id = %created.id, "Product created");
    Ok(format!("Created {}", created.id))
}

/// Validate and update a product.
///
/// # Errors
///
/// Returns an error if validation fails or the API rejects the update.
pub async fn update(args: ProductArgs) -> Result<String, CommandError> {
    let product = ProductDraft::from(args).validate(today())?;
    let updated = client()?.update_product(&product).await?;
    tracing::info!(product_id = %updated.id, "Product updated");
    Ok(format!("Updated {}", updated.id))
}

/// Delete a product.
///
/// # Errors
///
/// Returns an error if the id is malformed or the API request fails.
pub async fn delete(id: &str) -> Result<String, CommandError> {
    let id = ProductId::parse(id)?;
    client()?.delete_product(&id).await?;
    tracing::info!(product_id = %id, "Product deleted");
    Ok(format!("Deleted {id}"))
}

// =============================================================================
// Rendering
// =============================================================================

/// Filter, paginate and format `products` the same way the panel does.
///
/// A page past the end clamps to the last page.
#[must_use]
pub fn render_page(
    products: &[Product],
    search: &str,
    per_page: NonZeroUsize,
    page: NonZeroUsize,
) -> String {
    let filtered = filter_products(products, search);
    let mut paginator = Paginator::new(per_page);
    paginator.recalculate_total_pages(filtered.len());
    paginator.set_current_page(page.get());
    paginator.recalculate_total_pages(filtered.len());

    let rows = paginator.paginate(&filtered);
    let mut out = String::new();
    for product in rows {
        let _ = writeln!(
            out,
            "{:<10}  {:<30}  {}  {}",
            product.id,
            product.name,
            dates::format_display_date(product.date_release),
            dates::format_display_date(product.date_revision),
        );
    }

    if filtered.is_empty() {
        out.push_str("No products found\n");
    } else {
        let _ = writeln!(
            out,
            "Page {} of {} (showing {}-{} of {})",
            paginator.current_page(),
            paginator.total_pages(),
            paginator.start_index(),
            paginator.end_index(rows.len()),
            filtered.len(),
        );
    }
    out
}

fn render_product(product: &Product) -> String {
    format!(
        "ID:          {}\nName:        {}\nDescription: {}\nLogo:        {}\nReleased:    {}\nRevision:    {}",
        product.id,
        product.name,
        product.description,
        product.logo,
        dates::format_display_date(product.date_release),
        dates::format_display_date(product.date_revision),
    )
}

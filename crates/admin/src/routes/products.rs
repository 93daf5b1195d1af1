//! Product route handlers: listing, create, edit and delete.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use finprod_core::{Product, ProductDraft, ProductId, ValidationErrors};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::{
    api::ProductApiError,
    components::{DataTableConfig, PageSizeOption, products_table_config},
    config::parse_page_size,
    error::AppError,
    filters,
    middleware::{load_listing, save_listing, set_flash, take_flash},
    models::Flash,
    services::ProductListing,
    state::AppState,
};

/// Listing query parameters.
///
/// Each parameter is one listing event; absent parameters leave the state
/// untouched so a plain `GET /` re-renders the remembered page.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    /// New search term.
    pub q: Option<String>,
    /// New page size.
    pub per_page: Option<String>,
    /// Page navigation.
    pub nav: Option<Nav>,
}

/// Page navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nav {
    Prev,
    Next,
}

// =============================================================================
// Templates
// =============================================================================

/// Product listing page.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub table: DataTableConfig,
    pub page_sizes: Vec<PageSizeOption>,
    pub search: String,
    pub rows: Vec<Product>,
    pub total_matches: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub start_index: usize,
    pub end_index: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub flash: Option<Flash>,
}

/// Create/edit form page.
#[derive(Template, WebTemplate)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub title: &'static str,
    pub action: String,
    pub is_edit: bool,
    pub draft: ProductDraft,
    pub errors: ValidationErrors,
    pub flash: Option<Flash>,
}

impl ProductFormTemplate {
    fn create(draft: ProductDraft, errors: ValidationErrors) -> Self {
        Self {
            title: "New product",
            action: "/products".to_string(),
            is_edit: false,
            draft,
            errors,
            flash: None,
        }
    }

    fn edit(id: &str, draft: ProductDraft, errors: ValidationErrors) -> Self {
        Self {
            title: "Edit product",
            action: format!("/products/{id}"),
            is_edit: true,
            draft,
            errors,
            flash: None,
        }
    }

    fn with_flash(mut self, flash: Flash) -> Self {
        self.flash = Some(flash);
        self
    }
}

/// Delete confirmation dialog.
#[derive(Template, WebTemplate)]
#[template(path = "products/confirm_delete.html")]
pub struct ConfirmDeleteTemplate {
    pub product: Product,
}

/// Not found page.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub message: String,
}

fn not_found(message: impl Into<String>) -> Response {
    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            message: message.into(),
        },
    )
        .into_response()
}

/// Fallback for unknown paths.
pub async fn fallback() -> Response {
    not_found("The page you are looking for does not exist.")
}

fn upstream_failure(action: &str, error: &ProductApiError) -> Flash {
    tracing::error!(error = %error, action, "Product API request failed");
    Flash::error("Error", format!("Could not {action} the product. Please try again."))
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

// =============================================================================
// Listing
// =============================================================================

/// Product listing page handler.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListingQuery>,
) -> Result<ProductsIndexTemplate, AppError> {
    let page_size = query
        .per_page
        .as_deref()
        .map(parse_page_size)
        .transpose()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let mut listing_state = load_listing(&session, state.config().default_page_size).await?;
    let mut flash = take_flash(&session).await;

    let products = match state.api().get_products().await {
        Ok(products) => products,
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch products");
            flash = Some(Flash::error(
                "Error",
                "Could not load the products. Please try again later.",
            ));
            vec![]
        }
    };

    let mut listing = ProductListing::new(&mut listing_state);
    if let Some(term) = &query.q {
        listing.search(term);
    }
    if let Some(size) = page_size {
        listing.change_page_size(size, &products);
    }
    match query.nav {
        Some(Nav::Next) => {
            listing.next_page(&products);
        }
        Some(Nav::Prev) => {
            listing.previous_page(&products);
        }
        None => {}
    }
    let page = listing.page(&products);

    let table = products_table_config();
    let template = ProductsIndexTemplate {
        page_sizes: table.page_size_options(page.items_per_page),
        table,
        search: listing_state.search.clone(),
        rows: page.rows.into_iter().cloned().collect(),
        total_matches: page.total_matches,
        current_page: page.current_page,
        total_pages: page.total_pages,
        start_index: page.start_index,
        end_index: page.end_index,
        has_previous: page.has_previous,
        has_next: page.has_next,
        flash,
    };

    save_listing(&session, &listing_state).await?;
    Ok(template)
}

// =============================================================================
// Create
// =============================================================================

/// Empty create form.
pub async fn new_product() -> ProductFormTemplate {
    ProductFormTemplate::create(ProductDraft::default(), ValidationErrors::default())
}

/// Create a product.
#[instrument(skip(state, session, draft), fields(product_id = %draft.id))]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Form(draft): Form<ProductDraft>,
) -> Result<Response, AppError> {
    // Uniqueness is only worth asking about for a well-formed id
    let id_taken = if ProductId::parse(&draft.id).is_ok() {
        match state.api().product_exists(&draft.id).await {
            Ok(taken) => taken,
            Err(e) => {
                let flash = upstream_failure("verify", &e);
                return Ok(ProductFormTemplate::create(draft, ValidationErrors::default())
                    .with_flash(flash)
                    .into_response());
            }
        }
    } else {
        false
    };

    let product = match (draft.validate(today()), id_taken) {
        (Ok(product), false) => product,
        (result, taken) => {
            let mut errors = result.err().unwrap_or_default();
            if taken {
                errors.push("id", "id_taken", "This ID is already in use");
            }
            tracing::debug!(errors = %errors, "Product form rejected");
            return Ok(ProductFormTemplate::create(draft, errors).into_response());
        }
    };

    match state.api().add_product(&product).await {
        Ok(_) => {
            tracing::info!(product_id = %product.id, "Product created");
            set_flash(
                &session,
                Flash::success(
                    "Product added",
                    format!("{} was added successfully.", product.name),
                ),
            )
            .await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(e) => {
            let flash = upstream_failure("add", &e);
            Ok(ProductFormTemplate::create(draft, ValidationErrors::default())
                .with_flash(flash)
                .into_response())
        }
    }
}

// =============================================================================
// Edit
// =============================================================================

/// Edit form, pre-filled from the stored product.
#[instrument(skip(state))]
pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let Some(product) = state.api().get_product(&id).await? else {
        return Ok(not_found(format!("No product with ID '{id}'.")));
    };

    Ok(ProductFormTemplate::edit(&id, ProductDraft::from(&product), ValidationErrors::default())
        .into_response())
}

/// Update a product.
///
/// The id comes from the path; the submitted id field is ignored.
#[instrument(skip(state, session, draft))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Form(mut draft): Form<ProductDraft>,
) -> Result<Response, AppError> {
    draft.id.clone_from(&id);

    let product = match draft.validate(today()) {
        Ok(product) => product,
        Err(errors) => {
            tracing::debug!(errors = %errors, "Product form rejected");
            return Ok(ProductFormTemplate::edit(&id, draft, errors).into_response());
        }
    };

    match state.api().update_product(&product).await {
        Ok(_) => {
            tracing::info!(product_id = %product.id, "Product updated");
            set_flash(
                &session,
                Flash::success(
                    "Product updated",
                    format!("{} was updated successfully.", product.name),
                ),
            )
            .await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(e) => {
            let flash = upstream_failure("update", &e);
            Ok(ProductFormTemplate::edit(&id, draft, ValidationErrors::default())
                .with_flash(flash)
                .into_response())
        }
    }
}

// =============================================================================
// Delete
// =============================================================================

/// Delete confirmation dialog.
#[instrument(skip(state))]
pub async fn confirm_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    match state.api().get_product(&id).await? {
        Some(product) => Ok(ConfirmDeleteTemplate { product }.into_response()),
        None => Ok(not_found(format!("No product with ID '{id}'."))),
    }
}

/// Delete a product and return to the listing.
///
/// The listing clamps its current page on the next render if this emptied
/// the last page.
#[instrument(skip(state, session))]
pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let product_id = ProductId::parse(&id).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let flash = match state.api().delete_product(&product_id).await {
        Ok(()) => {
            tracing::info!(product_id = %product_id, "Product deleted");
            Flash::success("Product deleted", "The product was deleted successfully.")
        }
        Err(e) => upstream_failure("delete", &e),
    };
    set_flash(&session, flash).await?;

    Ok(Redirect::to("/"))
}

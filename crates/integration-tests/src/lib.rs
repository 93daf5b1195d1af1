//! Integration test support for Finprod.
//!
//! Tests run the real admin router against an in-process fake of the
//! upstream product API, both bound to ephemeral ports on localhost.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p finprod-integration-tests
//! ```

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use finprod_admin::{AdminConfig, AppState};
use finprod_core::{Product, ProductId};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// Author id the fake upstream accepts.
pub const AUTHOR_ID: &str = "4321";

/// Path of the product collection on the fake upstream.
pub const PRODUCTS_PATH: &str = "/bp/products";

// =============================================================================
// Fake upstream
// =============================================================================

#[derive(Clone)]
struct Upstream {
    products: Arc<Mutex<Vec<Product>>>,
}

#[derive(Deserialize)]
struct IdQuery {
    id: String,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorid")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == AUTHOR_ID)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "name": "UnauthorizedError", "message": "Missing authorId" })),
    )
        .into_response()
}

fn not_found(id: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "name": "NotFoundError", "message": format!("Product {id} not found") })),
    )
        .into_response()
}

async fn list(State(upstream): State<Upstream>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let products = upstream.products.lock().await;
    Json(json!({ "data": &*products })).into_response()
}

async fn create(
    State(upstream): State<Upstream>,
    headers: HeaderMap,
    Json(product): Json<Product>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    upstream.products.lock().await.push(product.clone());
    Json(json!({ "message": "Product added successfully", "data": product })).into_response()
}

async fn update(
    State(upstream): State<Upstream>,
    headers: HeaderMap,
    Json(product): Json<Product>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut products = upstream.products.lock().await;
    let Some(slot) = products.iter_mut().find(|p| p.id == product.id) else {
        return not_found(product.id.as_str());
    };
    slot.clone_from(&product);
    Json(json!({ "message": "Product updated successfully", "data": product })).into_response()
}

async fn delete(
    State(upstream): State<Upstream>,
    headers: HeaderMap,
    Query(query): Query<IdQuery>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut products = upstream.products.lock().await;
    let before = products.len();
    products.retain(|p| p.id != query.id.as_str());
    if products.len() == before {
        return not_found(&query.id);
    }
    Json(json!({ "message": "Product removed successfully" })).into_response()
}

async fn verify(
    State(upstream): State<Upstream>,
    headers: HeaderMap,
    Query(query): Query<IdQuery>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let products = upstream.products.lock().await;
    Json(products.iter().any(|p| p.id == query.id.as_str())).into_response()
}

/// In-process fake of the upstream product API.
#[derive(Clone)]
pub struct FakeProductApi {
    /// Collection URL, e.g. `http://127.0.0.1:41234/bp/products`.
    pub url: String,
    upstream: Upstream,
}

impl FakeProductApi {
    /// Start the fake seeded with `products`.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start(products: Vec<Product>) -> Self {
        let upstream = Upstream {
            products: Arc::new(Mutex::new(products)),
        };
        let app = Router::new()
            .route(
                PRODUCTS_PATH,
                get(list).post(create).put(update).delete(delete),
            )
            .route(&format!("{PRODUCTS_PATH}/verification"), get(verify))
            .with_state(upstream.clone());

        let addr = serve(app).await;
        Self {
            url: format!("http://{addr}{PRODUCTS_PATH}"),
            upstream,
        }
    }

    /// Snapshot of the stored products.
    pub async fn products(&self) -> Vec<Product> {
        self.upstream.products.lock().await.clone()
    }

    /// Find a stored product.
    pub async fn find(&self, id: &str) -> Option<Product> {
        self.products().await.into_iter().find(|p| p.id == id)
    }
}

async fn serve(app: Router) -> std::net::SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

// =============================================================================
// Panel
// =============================================================================

/// A running panel wired to a fake upstream.
pub struct TestPanel {
    /// Panel root URL without trailing slash.
    pub base_url: String,
    /// Client with a cookie store, so the listing session persists.
    pub client: reqwest::Client,
    /// Same cookie jar as `client`, but redirects are returned as-is.
    no_redirect: reqwest::Client,
    /// The upstream the panel talks to.
    pub upstream: FakeProductApi,
}

impl TestPanel {
    /// Start a panel over a fresh upstream seeded with `products`.
    pub async fn start(products: Vec<Product>) -> Self {
        let upstream = FakeProductApi::start(products).await;
        Self::start_with(upstream, AUTHOR_ID).await
    }

    /// Start a panel over `upstream`, sending `author_id`.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is rejected or no port can be bound.
    pub async fn start_with(upstream: FakeProductApi, author_id: &str) -> Self {
        let api_url = upstream.url.clone();
        let author_id = author_id.to_string();
        let config = AdminConfig::from_vars(&|key| match key {
            "PRODUCTS_API_URL" => Some(api_url.clone()),
            "PRODUCTS_AUTHOR_ID" => Some(author_id.clone()),
            _ => None,
        })
        .expect("Invalid test configuration");

        let addr = serve(finprod_admin::app(AppState::new(config))).await;
        let jar = Arc::new(reqwest::cookie::Jar::default());
        let client = reqwest::Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .build()
            .expect("Failed to create HTTP client");
        let no_redirect = reqwest::Client::builder()
            .cookie_provider(jar)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: format!("http://{addr}"),
            client,
            no_redirect,
            upstream,
        }
    }

    /// Absolute URL for a panel path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET a panel path and return status and body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn get(&self, path: &str) -> (reqwest::StatusCode, String) {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed");
        let status = response.status();
        (status, response.text().await.expect("Failed to read body"))
    }

    /// POST a form to a panel path, following redirects.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn post_form(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> (reqwest::StatusCode, String) {
        let response = self
            .client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST request failed");
        let status = response.status();
        (status, response.text().await.expect("Failed to read body"))
    }

    /// POST a form without following the redirect, so any flash set by the
    /// handler stays pending in the session.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn post_form_no_follow(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> reqwest::StatusCode {
        self.no_redirect
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST request failed")
            .status()
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// A product with fixed dates.
///
/// # Panics
///
/// Panics if `id` is not a valid product id.
#[must_use]
pub fn product(id: &str, name: &str) -> Product {
    Product {
        id: ProductId::parse(id).expect("Invalid fixture id"),
        name: name.to_string(),
        description: format!("{name} para clientes"),
        logo: "https://example.com/logo.png".to_string(),
        date_release: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default(),
        date_revision: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default(),
    }
}

/// `count` products `prd-000`, `prd-001`, ... alternating "Tarjeta" and
/// "Cuenta" names.
#[must_use]
pub fn catalog(count: usize) -> Vec<Product> {
    (0..count)
        .map(|i| {
            let name = if i % 2 == 0 {
                format!("Tarjeta {i:03}")
            } else {
                format!("Cuenta {i:03}")
            };
            product(&format!("prd-{i:03}"), &name)
        })
        .collect()
}

/// Product ids with an edit link in a listing page, in order.
#[must_use]
pub fn listed_ids(html: &str) -> Vec<String> {
    html.split("href=\"/products/")
        .skip(1)
        .filter_map(|rest| {
            let (id, tail) = rest.split_once('/')?;
            tail.starts_with("edit\"").then(|| id.to_string())
        })
        .collect()
}

/// A date `days` from today as `YYYY-MM-DD`.
#[must_use]
pub fn days_from_today(days: u64) -> String {
    let date = chrono::Local::now().date_naive() + chrono::Days::new(days);
    date.format("%Y-%m-%d").to_string()
}

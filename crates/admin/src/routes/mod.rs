//! HTTP route handlers for the panel.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Product API reachability
//!
//! # Products
//! GET  /                       - Product listing (?q=, ?per_page=, ?nav=prev|next)
//! GET  /products/new           - Create form
//! POST /products               - Create product
//! GET  /products/{id}/edit     - Edit form
//! POST /products/{id}          - Update product
//! GET  /products/{id}/delete   - Delete confirmation
//! POST /products/{id}/delete   - Delete product
//!
//! GET  /static/*               - Static assets
//! ```

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::create_session_layer;
use crate::state::AppState;

pub mod health;
pub mod products;

/// Directory holding CSS and images.
const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Build the route table.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Health
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        // Products
        .route("/", get(products::index))
        .route("/products", post(products::create))
        .route("/products/new", get(products::new_product))
        .route("/products/{id}", post(products::update))
        .route("/products/{id}/edit", get(products::edit))
        .route(
            "/products/{id}/delete",
            get(products::confirm_delete).post(products::delete),
        )
}

/// Build the full application: routes, static files, sessions and request
/// tracing.
///
/// Sentry layers are added by the binary, outside this router.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    Router::new()
        .merge(routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .fallback(products::fallback)
        .layer(session_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::config::AdminConfig;

    fn test_app() -> Router {
        let config = AdminConfig::from_vars(&|key| match key {
            "PRODUCTS_API_URL" => Some("http://127.0.0.1:9/bp/products".to_string()),
            "PRODUCTS_AUTHOR_ID" => Some("4321".to_string()),
            _ => None,
        })
        .unwrap();
        app(AppState::new(config))
    }

    async fn get(path: &str) -> (StatusCode, String) {
        let response = test_app()
            .oneshot(Request::get(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_new_product_form() {
        let (status, body) = get("/products/new").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("New product"));
    }

    #[tokio::test]
    async fn test_unknown_path_renders_not_found() {
        let (status, body) = get("/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("does not exist"));
    }

    #[tokio::test]
    async fn test_listing_survives_unreachable_api() {
        let (status, body) = get("/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Could not load the products"));
        assert!(body.contains("No products found"));
    }
}

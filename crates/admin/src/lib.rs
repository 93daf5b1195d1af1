//! Finprod admin library.
//!
//! This crate provides the product panel as a library, allowing it to be
//! tested end to end and reused by the CLI.
//!
//! # Modules
//!
//! - [`api`] - typed client for the upstream product API
//! - [`services`] - listing state machine (search + pagination)
//! - [`routes`] - axum handlers and the application router
//! - [`config`] - environment configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod components;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use api::{ProductApiClient, ProductApiError};
pub use config::{AdminConfig, ConfigError, ProductApiConfig};
pub use error::AppError;
pub use routes::app;
pub use state::AppState;

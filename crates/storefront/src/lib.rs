//! Artisan Market Storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod demo;
pub mod error;
pub mod filters;
pub mod image_cache;
pub mod media;
pub mod middleware;
pub mod profiles;
pub mod routes;
pub mod state;

use axum::{Router, middleware::from_fn};
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Directory static assets are served from.
pub const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Build the storefront router with its application middleware.
///
/// Tracing and Sentry layers are added by the binary.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(from_fn(middleware::security_headers_middleware))
        .layer(from_fn(middleware::request_id_middleware))
        .with_state(state)
}

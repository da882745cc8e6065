//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (pings the profile API)
//!
//! # Artisans
//! GET  /artisans               - Artisan listing (?category=&q=)
//! GET  /artisans/{id}          - Artisan profile
//! GET  /artisans/{id}/gallery  - Gallery fragment (HTMX), fills the image cache
//! POST /artisans/{id}/image    - Portrait upload (multipart)
//!
//! # Products
//! GET  /products               - Every product across artisans
//!
//! # Search
//! GET  /search/suggest         - Suggestion fragment (HTMX, ?q=)
//! GET  /search/select          - Redirect to the chosen artisan's category (?artisan=)
//! ```

pub mod artisans;
pub mod health;
pub mod home;
pub mod products;
pub mod search;
pub mod views;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Health checks
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        // Artisan routes
        .nest("/artisans", artisans::router())
        // Product listing
        .route("/products", get(products::index))
        // Search suggestions
        .nest("/search", search::router())
}

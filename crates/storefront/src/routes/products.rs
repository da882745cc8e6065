//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use super::views::ProductCard;
use crate::filters;
use crate::state::AppState;

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductCard>,
}

/// Display every product across all artisans.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let products = state.catalog().products().await;

    ProductsIndexTemplate {
        products: products.iter().map(ProductCard::from).collect(),
    }
}

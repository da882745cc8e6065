//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use artisan_market_core::catalog::flatten_products;

use super::views::{ArtisanCard, CategoryTile, ProductCard, category_tiles};
use crate::filters;
use crate::state::AppState;

/// Number of artisans featured on the home page.
const FEATURED_ARTISANS: usize = 4;

/// Number of products featured on the home page.
const FEATURED_PRODUCTS: usize = 8;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub artisans: Vec<ArtisanCard>,
    pub products: Vec<ProductCard>,
    pub categories: Vec<CategoryTile>,
}

/// Display the home page.
///
/// New products are featured ahead of the rest, otherwise catalog order.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let artisans = state.catalog().artisans().await;

    let mut products = flatten_products(&artisans);
    // Stable sort keeps catalog order within each group
    products.sort_by_key(|item| !item.product.is_new);

    HomeTemplate {
        artisans: artisans
            .iter()
            .take(FEATURED_ARTISANS)
            .map(|artisan| ArtisanCard::new(artisan, state.images()))
            .collect(),
        products: products
            .iter()
            .take(FEATURED_PRODUCTS)
            .map(ProductCard::from)
            .collect(),
        categories: category_tiles(),
    }
}

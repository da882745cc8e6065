//! Artisan route handlers.

use artisan_market_core::filter::{category_title, filter_by_category};
use artisan_market_core::image_cache::ImageKey;
use artisan_market_core::{ArtisanId, ArtisanProfile, CatalogProduct};
use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    response::{IntoResponse, Redirect},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use super::views::{ArtisanCard, ProductCard};
use crate::error::{AppError, Result};
use crate::filters;
use crate::media::{data_uri_from_bytes, populate_gallery};
use crate::state::AppState;

/// Largest accepted portrait upload.
const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Multipart field carrying the portrait file.
const IMAGE_FIELD: &str = "image";

/// Listing query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub category: Option<String>,
    /// Prefills the search box.
    pub q: Option<String>,
}

/// Artisan listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "artisans/index.html")]
pub struct ArtisansIndexTemplate {
    pub title: String,
    pub category: Option<String>,
    pub query: String,
    pub artisans: Vec<ArtisanCard>,
}

/// Artisan profile display data.
pub struct ProfileView {
    pub card: ArtisanCard,
    pub story: String,
    pub price_range: Option<String>,
    pub sales_channels: Option<String>,
    pub languages: Option<String>,
    pub brand_style: Option<String>,
}

impl ProfileView {
    fn new(artisan: &ArtisanProfile, card: ArtisanCard) -> Self {
        Self {
            card,
            story: artisan.backstory.story.clone(),
            price_range: artisan
                .price_range
                .is_specified()
                .then(|| artisan.price_range.to_string()),
            sales_channels: artisan.sales_channels.clone(),
            languages: artisan.languages.clone(),
            brand_style: artisan.brand_style.clone(),
        }
    }
}

/// Artisan profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "artisans/show.html")]
pub struct ArtisanShowTemplate {
    pub artisan: ProfileView,
    pub products: Vec<ProductCard>,
}

/// Gallery fragment template (HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/gallery.html")]
pub struct GalleryTemplate {
    pub artisan_name: String,
    pub images: Vec<String>,
}

/// Display the artisan listing, optionally narrowed to a category.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> impl IntoResponse {
    let artisans = state.catalog().artisans().await;
    let category = query
        .category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    let cards = filter_by_category(category.as_deref(), &artisans)
        .into_iter()
        .map(|artisan| ArtisanCard::new(artisan, state.images()))
        .collect();

    ArtisansIndexTemplate {
        title: category_title(category.as_deref()),
        category,
        query: query.q.unwrap_or_default(),
        artisans: cards,
    }
}

/// Display one artisan's profile.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = ArtisanId::parse(&raw_id)?;
    let artisan = state.catalog().artisan(&id).await?;

    let products = artisan
        .products
        .iter()
        .map(|product| {
            ProductCard::from(&CatalogProduct {
                product: product.clone(),
                artisan_id: artisan.id.clone(),
                artisan_name: artisan.name.clone(),
            })
        })
        .collect();

    let card = ArtisanCard::new(&artisan, state.images());

    Ok(ArtisanShowTemplate {
        artisan: ProfileView::new(&artisan, card),
        products,
    })
}

/// Load the artisan's generated media into the image cache (HTMX fragment).
///
/// When the media listing cannot be fetched, the previously cached gallery
/// is shown instead.
#[instrument(skip(state))]
pub async fn gallery(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = ArtisanId::parse(&raw_id)?;
    let artisan = state.catalog().artisan(&id).await?;

    let images = match state.profiles().list_media(&id).await {
        Ok(items) => populate_gallery(state.images(), &id, &items),
        Err(e) => {
            tracing::error!("Failed to fetch media for {id}: {e}");
            cached_gallery(&state, &id)
        }
    };

    Ok(GalleryTemplate {
        artisan_name: artisan.name,
        images,
    })
}

/// Gallery images already in the cache, in index order.
fn cached_gallery(state: &AppState, id: &ArtisanId) -> Vec<String> {
    (0..)
        .map_while(|index| state.images().get(&ImageKey::Gallery(id.clone(), index)))
        .collect()
}

/// Store an uploaded portrait for an artisan.
///
/// Expects a multipart form with an `image` file field. Redirects back to the
/// profile page.
#[instrument(skip(state, multipart))]
pub async fn upload_image(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Redirect> {
    let id = ArtisanId::parse(&raw_id)?;
    // Unknown artisans are rejected before reading the body
    state.catalog().artisan(&id).await?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let content_type = field.content_type().map(String::from);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        let data_uri = data_uri_from_bytes(&bytes, content_type.as_deref())?;

        tracing::info!(artisan_id = %id, bytes = bytes.len(), "Stored uploaded portrait");
        state.images().set(ImageKey::Portrait(id.clone()), data_uri);

        return Ok(Redirect::to(&format!(
            "/artisans/{}",
            urlencoding::encode(id.as_str())
        )));
    }

    Err(AppError::BadRequest(format!("missing '{IMAGE_FIELD}' field")))
}

/// Create the artisan routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/{id}", get(show))
        .route("/{id}/gallery", get(gallery))
        .route(
            "/{id}/image",
            post(upload_image).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
}

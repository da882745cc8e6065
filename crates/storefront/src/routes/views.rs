//! Template view models shared by several pages.

use artisan_market_core::filter::{category_title, known_categories};
use artisan_market_core::image_cache::{ImageCache, ImageKey};
use artisan_market_core::{ArtisanProfile, CatalogProduct};

/// Artisan card display data for templates.
#[derive(Clone)]
pub struct ArtisanCard {
    pub id: String,
    pub name: String,
    pub craft_type: String,
    pub location: Option<String>,
    /// Cached portrait data URI.
    pub image: Option<String>,
    /// Placeholder letter shown when there is no image.
    pub initial: String,
    pub materials: String,
    pub tagline: Option<String>,
    pub years_experience: Option<u32>,
}

impl ArtisanCard {
    /// Build a card, decorating it with the cached portrait if present.
    pub fn new(artisan: &ArtisanProfile, images: &dyn ImageCache) -> Self {
        Self {
            id: artisan.id.to_string(),
            name: artisan.name.clone(),
            craft_type: artisan.craft_type.clone(),
            location: artisan.location.clone(),
            image: images.get(&ImageKey::Portrait(artisan.id.clone())),
            initial: artisan.initial(),
            materials: artisan.materials.joined(),
            tagline: artisan.backstory.tagline.clone(),
            years_experience: artisan.years_experience,
        }
    }
}

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductCard {
    pub id: String,
    pub title: String,
    pub price: String,
    pub category: String,
    pub is_new: bool,
    pub image: Option<String>,
    pub description: String,
    pub artisan_id: String,
    pub artisan_name: String,
}

impl From<&CatalogProduct> for ProductCard {
    fn from(item: &CatalogProduct) -> Self {
        Self {
            id: item.product.id.to_string(),
            title: item.product.title.clone(),
            price: item.product.price.display(),
            category: item.product.category.clone(),
            is_new: item.product.is_new,
            image: item.product.image.clone(),
            description: item.product.description.clone(),
            artisan_id: item.artisan_id.to_string(),
            artisan_name: item.artisan_name.clone(),
        }
    }
}

/// Category tile linking to a filtered artisan listing.
#[derive(Clone)]
pub struct CategoryTile {
    pub key: String,
    pub title: String,
}

/// Tiles for every known category.
pub fn category_tiles() -> Vec<CategoryTile> {
    known_categories()
        .into_iter()
        .map(|key| CategoryTile {
            key: key.to_string(),
            title: category_title(Some(key)),
        })
        .collect()
}

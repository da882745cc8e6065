//! Artisan profiles and their products.

use serde::{Deserialize, Serialize};

use super::id::{ArtisanId, ProductId};
use super::materials::Materials;
use super::price::{Price, PriceRange};

/// A craftsperson profile with biography and products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtisanProfile {
    pub id: ArtisanId,
    pub name: String,
    pub craft_type: String,
    pub materials: Materials,
    pub backstory: Backstory,
    /// Home state or region.
    pub location: Option<String>,
    pub years_experience: Option<u32>,
    pub price_range: PriceRange,
    pub products: Vec<Product>,
    /// Where the artisan sells ("online", "offline", "both").
    pub sales_channels: Option<String>,
    pub languages: Option<String>,
    pub brand_style: Option<String>,
}

impl ArtisanProfile {
    /// Upper-cased first letter of the display name, used as an image placeholder.
    #[must_use]
    pub fn initial(&self) -> String {
        self.name
            .trim()
            .chars()
            .next()
            .map_or_else(|| "?".to_string(), |c| c.to_uppercase().collect())
    }
}

/// A sellable item owned by one artisan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    /// Image URL or data URI.
    pub image: Option<String>,
    pub category: String,
    pub is_new: bool,
    pub description: String,
}

/// A product flattened out of its artisan, for catalog-wide listings.
///
/// Carries the owning artisan's identifier alongside the display name so links
/// never need to resolve the artisan by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogProduct {
    pub product: Product,
    pub artisan_id: ArtisanId,
    pub artisan_name: String,
}

/// Marker separating the story from the tagline in stored backstories.
const TAGLINE_MARKER: &str = "tagline:";

/// Label some stored backstories start with.
const BACKSTORY_LABEL: &str = "backstory:";

/// An artisan's backstory, split from its optional tagline suffix.
///
/// Stored backstories look like `"<story>\n\nTagline: <tagline>"`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Backstory {
    pub story: String,
    pub tagline: Option<String>,
}

impl Backstory {
    /// Split stored backstory text on the first case-insensitive `Tagline:` marker.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let (story, tagline) = find_ascii_ci(raw, TAGLINE_MARKER).map_or((raw, None), |idx| {
            let (story, rest) = raw.split_at(idx);
            let tagline = rest.get(TAGLINE_MARKER.len()..).unwrap_or_default().trim();
            (story, (!tagline.is_empty()).then(|| tagline.to_string()))
        });

        let story = story.trim();
        let story = match story.get(..BACKSTORY_LABEL.len()) {
            Some(label) if label.eq_ignore_ascii_case(BACKSTORY_LABEL) => story
                .get(BACKSTORY_LABEL.len()..)
                .unwrap_or_default()
                .trim_start(),
            _ => story,
        };

        Self {
            story: story.to_string(),
            tagline,
        }
    }

    /// Whether there is no story text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.story.is_empty()
    }
}

/// Byte offset of the first ASCII case-insensitive occurrence of `needle`.
///
/// `needle` must be ASCII, so any match starts on a char boundary.
fn find_ascii_ci(haystack: &str, needle: &str) -> Option<usize> {
    let hay = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() || hay.len() < needle.len() {
        return None;
    }
    hay.windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}

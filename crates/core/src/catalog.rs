//! Normalizes remote profile JSON into catalog types.
//!
//! The profile store is filled by a conversational onboarding flow, so records
//! are loosely typed: numbers arrive as strings, materials as a string or a
//! list, whole fields go missing. Everything here is lenient. A malformed body
//! yields an empty catalog, never an error.
//!
//! # Example
//!
//! ```rust
//! use artisan_market_core::catalog::{flatten_products, parse_profiles};
//! use serde_json::json;
//!
//! let body = json!({
//!     "user_profiles": [
//!         { "user_id": "a1", "name": "Ravi Kumar", "craft_type": "Pottery",
//!           "products": [{ "id": "p1", "title": "Blue Vase", "price": 1200 }] }
//!     ]
//! });
//!
//! let artisans = parse_profiles(&body);
//! let products = flatten_products(&artisans);
//! assert_eq!(products[0].artisan_name, "Ravi Kumar");
//! ```

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::types::{
    ArtisanId, ArtisanProfile, Backstory, CatalogProduct, Materials, Price, PriceRange, Product,
    ProductId,
};

/// Key holding the profile list in the remote list body.
pub const PROFILES_KEY: &str = "user_profiles";

/// Parse the remote profile list body `{ "user_profiles": [...] }`.
///
/// A missing key, `null`, or any non-array value yields an empty list.
/// Entries that are not JSON objects are skipped; everything else is coerced.
#[must_use]
pub fn parse_profiles(body: &Value) -> Vec<ArtisanProfile> {
    let Some(records) = body.get(PROFILES_KEY).and_then(Value::as_array) else {
        return Vec::new();
    };

    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            record
                .as_object()
                .map(|fields| artisan_from_fields(fields, index))
        })
        .collect()
}

/// Parse a single profile body from the detail endpoint.
///
/// Returns `None` for `null`, non-objects, and empty objects (the remote
/// source's "not found").
#[must_use]
pub fn parse_profile(body: &Value) -> Option<ArtisanProfile> {
    body.as_object()
        .filter(|fields| !fields.is_empty())
        .map(|fields| artisan_from_fields(fields, 0))
}

/// Flatten every artisan's products into one list.
///
/// Artisans keep source order, and products keep per-artisan order.
#[must_use]
pub fn flatten_products(artisans: &[ArtisanProfile]) -> Vec<CatalogProduct> {
    artisans
        .iter()
        .flat_map(|artisan| {
            artisan.products.iter().map(|product| CatalogProduct {
                product: product.clone(),
                artisan_id: artisan.id.clone(),
                artisan_name: artisan.name.clone(),
            })
        })
        .collect()
}

/// Find an artisan by identifier.
#[must_use]
pub fn find_artisan<'a>(artisans: &'a [ArtisanProfile], id: &ArtisanId) -> Option<&'a ArtisanProfile> {
    artisans.iter().find(|artisan| &artisan.id == id)
}

fn artisan_from_fields(fields: &Map<String, Value>, index: usize) -> ArtisanProfile {
    let id = string_field(fields, "user_id")
        .or_else(|| string_field(fields, "id"))
        .map_or_else(|| ArtisanId::new(format!("artisan-{index}")), ArtisanId::new);

    let products = fields
        .get("products")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .enumerate()
                .filter_map(|(i, item)| item.as_object().map(|p| product_from_fields(p, &id, i)))
                .collect()
        })
        .unwrap_or_default();

    let materials = match fields.get("materials") {
        Some(Value::String(text)) => Materials::from_text(text),
        Some(Value::Array(entries)) => {
            Materials::from_list(entries.iter().filter_map(Value::as_str))
        }
        _ => Materials::default(),
    };

    let price_range = match fields.get("price_range") {
        Some(Value::Number(n)) => n
            .to_string()
            .parse::<Decimal>()
            .map_or(PriceRange::Unspecified, PriceRange::Amount),
        Some(Value::String(text)) => PriceRange::from_text(text),
        _ => PriceRange::Unspecified,
    };

    ArtisanProfile {
        id,
        name: string_field(fields, "name").unwrap_or_default(),
        craft_type: string_field(fields, "craft_type").unwrap_or_default(),
        materials,
        backstory: string_field(fields, "backstory")
            .map(|raw| Backstory::parse(&raw))
            .unwrap_or_default(),
        location: string_field(fields, "state").or_else(|| string_field(fields, "location")),
        years_experience: fields.get("years_experience").and_then(leading_number),
        price_range,
        products,
        sales_channels: string_field(fields, "sales_channels"),
        languages: string_field(fields, "languages"),
        brand_style: string_field(fields, "brand_style"),
    }
}

fn product_from_fields(fields: &Map<String, Value>, artisan_id: &ArtisanId, index: usize) -> Product {
    let id = string_field(fields, "id")
        .map_or_else(|| ProductId::new(format!("{artisan_id}-{index}")), ProductId::new);

    let amount = match fields.get("price") {
        Some(Value::Number(n)) => n.to_string().parse::<Decimal>().ok(),
        Some(Value::String(s)) => s.trim().parse::<Decimal>().ok(),
        _ => None,
    };

    Product {
        id,
        title: string_field(fields, "title")
            .or_else(|| string_field(fields, "name"))
            .unwrap_or_default(),
        price: Price::inr(amount.unwrap_or_default()),
        image: string_field(fields, "image"),
        category: string_field(fields, "category").unwrap_or_default(),
        is_new: fields
            .get("isNew")
            .or_else(|| fields.get("is_new"))
            .and_then(Value::as_bool)
            .unwrap_or(false),
        description: string_field(fields, "description").unwrap_or_default(),
    }
}

/// Read a field as trimmed, non-empty text. Numbers are stringified.
fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse a count from a number or from the leading digits of text ("10 years").
fn leading_number(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => {
            let digits: String = s.trim().chars().take_while(char::is_ascii_digit).collect();
            digits.parse().ok()
        }
        _ => None,
    }
}

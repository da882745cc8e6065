//! Suggestion and category filters over the artisan list.
//!
//! Both filters are case-insensitive substring matches in source order, with
//! no ranking. They differ on materials, and that difference is kept on
//! purpose:
//!
//! - [`suggest`] matches materials only when they were recorded as text, and
//!   matches the original text.
//! - [`filter_by_category`] matches materials only when they were recorded as
//!   a list, and matches any entry.

use crate::types::ArtisanProfile;

/// Minimum trimmed query length (in characters) before suggestions are shown.
pub const MIN_QUERY_CHARS: usize = 2;

/// Maximum number of suggestions returned.
pub const MAX_SUGGESTIONS: usize = 8;

/// Known category keys and their listing titles.
const CATEGORY_TITLES: &[(&str, &str)] = &[
    ("pottery", "Pottery & Ceramics"),
    ("textiles", "Textile Weavers"),
    ("beads", "Beadwork Artisans"),
    ("woodwork", "Woodcraft Masters"),
    ("golden", "Golden Grass & Gilded Crafts"),
];

/// Whether a query is long enough to produce suggestions.
#[must_use]
pub fn is_suggestable(query: &str) -> bool {
    query.trim().chars().count() >= MIN_QUERY_CHARS
}

/// Whether an artisan matches a suggestion query.
///
/// `needle` must already be lower-cased.
fn matches_suggestion(artisan: &ArtisanProfile, needle: &str) -> bool {
    contains_ci(&artisan.name, needle)
        || contains_ci(&artisan.craft_type, needle)
        || artisan
            .materials
            .as_text()
            .is_some_and(|text| contains_ci(text, needle))
}

/// Artisans matching a free-text query on name, craft type or text materials.
///
/// Queries shorter than [`MIN_QUERY_CHARS`] after trimming return nothing.
/// At most [`MAX_SUGGESTIONS`] matches are returned, in source order.
#[must_use]
pub fn suggest<'a>(query: &str, artisans: &'a [ArtisanProfile]) -> Vec<&'a ArtisanProfile> {
    if !is_suggestable(query) {
        return Vec::new();
    }
    let needle = query.trim().to_lowercase();

    artisans
        .iter()
        .filter(|artisan| matches_suggestion(artisan, &needle))
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Normalize an optional category parameter, treating blank as absent.
fn normalize_category(category: Option<&str>) -> Option<&str> {
    category.map(str::trim).filter(|c| !c.is_empty())
}

/// Artisans in a category.
///
/// With no category (or a blank one) every artisan is returned unchanged.
/// Otherwise an artisan matches when its craft type contains the category,
/// or when its list-shaped materials have an entry containing it.
#[must_use]
pub fn filter_by_category<'a>(
    category: Option<&str>,
    artisans: &'a [ArtisanProfile],
) -> Vec<&'a ArtisanProfile> {
    let Some(category) = normalize_category(category) else {
        return artisans.iter().collect();
    };
    let needle = category.to_lowercase();

    artisans
        .iter()
        .filter(|artisan| {
            contains_ci(&artisan.craft_type, &needle)
                || (artisan.materials.is_list()
                    && artisan
                        .materials
                        .items()
                        .iter()
                        .any(|item| contains_ci(item, &needle)))
        })
        .collect()
}

/// Listing title for a category.
///
/// Known keys map to fixed titles; unknown categories become
/// `"<Category> Artisans"`; no category is `"All Artisans"`.
#[must_use]
pub fn category_title(category: Option<&str>) -> String {
    let Some(category) = normalize_category(category) else {
        return "All Artisans".to_string();
    };

    let key = category.to_lowercase();
    if let Some((_, title)) = CATEGORY_TITLES.iter().find(|(k, _)| *k == key) {
        return (*title).to_string();
    }

    let mut chars = category.chars();
    let capitalized: String = chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default();
    format!("{capitalized} Artisans")
}

/// Known category keys, in display order.
#[must_use]
pub fn known_categories() -> Vec<&'static str> {
    CATEGORY_TITLES.iter().map(|(key, _)| *key).collect()
}

fn contains_ci(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

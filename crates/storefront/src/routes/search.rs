//! Search route handlers.
//!
//! The search box sends `GET /search/suggest?q=` through HTMX with a 250 ms
//! `delay` trigger and `hx-sync="this:replace"`, so only the last keystroke in
//! the window fetches and a newer request replaces an in-flight one. Blurring
//! the box requests the fragment with no query 150 ms later, which clears the
//! list, and shares the same sync scope so it also replaces a pending fetch.

use artisan_market_core::ArtisanId;
use artisan_market_core::filter::{is_suggestable, suggest as suggest_artisans};
use artisan_market_core::suggest::Suggestion;
use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::{Query, State},
    response::{IntoResponse, Redirect},
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::state::AppState;

/// Search suggestions query parameters.
#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub q: String,
}

/// Suggestion selection query parameters.
#[derive(Debug, Deserialize)]
pub struct SelectQuery {
    pub artisan: String,
}

/// One suggestion row.
#[derive(Clone)]
pub struct SuggestionView {
    pub id: String,
    pub name: String,
    pub craft_type: String,
    pub location: Option<String>,
}

/// Search suggestions template (HTMX fragment).
#[derive(Template, WebTemplate)]
#[template(path = "partials/search_suggestions.html")]
pub struct SuggestionsTemplate {
    pub query: String,
    pub suggestions: Vec<SuggestionView>,
}

/// Search suggestions endpoint (HTMX).
///
/// Queries shorter than two characters render an empty fragment without
/// touching the catalog. Otherwise at most eight matches are returned.
#[instrument(skip(state))]
pub async fn suggest(
    State(state): State<AppState>,
    Query(query): Query<SuggestQuery>,
) -> impl IntoResponse {
    if !is_suggestable(&query.q) {
        return SuggestionsTemplate {
            query: query.q,
            suggestions: Vec::new(),
        };
    }

    let artisans = state.catalog().artisans().await;
    let suggestions = suggest_artisans(&query.q, &artisans)
        .into_iter()
        .map(|artisan| SuggestionView {
            id: artisan.id.to_string(),
            name: artisan.name.clone(),
            craft_type: artisan.craft_type.clone(),
            location: artisan.location.clone(),
        })
        .collect();

    SuggestionsTemplate {
        query: query.q,
        suggestions,
    }
}

/// Choose a suggestion.
///
/// Redirects to the artisan listing filtered by the chosen artisan's craft
/// type, with the search box reset to that craft type.
#[instrument(skip(state))]
pub async fn select(
    State(state): State<AppState>,
    Query(query): Query<SelectQuery>,
) -> Result<Redirect> {
    let id = ArtisanId::parse(&query.artisan)?;
    let artisan = state.catalog().artisan(&id).await?;
    Ok(Redirect::to(&listing_url(artisan.category())))
}

/// Artisan listing URL for a craft type, used as both category and query.
fn listing_url(craft_type: &str) -> String {
    let encoded = urlencoding::encode(craft_type);
    format!("/artisans?category={encoded}&q={encoded}")
}

/// Create the search routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/suggest", get(suggest))
        .route("/select", get(select))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_url_encodes_craft_type() {
        assert_eq!(
            listing_url("Traditional Blue Pottery"),
            "/artisans?category=Traditional%20Blue%20Pottery&q=Traditional%20Blue%20Pottery"
        );
        assert_eq!(listing_url("Wood & Brass"), "/artisans?category=Wood%20%26%20Brass&q=Wood%20%26%20Brass");
    }
}

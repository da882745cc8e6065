//! Client for the remote artisan profile API.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP with `reqwest`; no auth, no pagination
//! - The profile API is the source of truth - NO local sync
//! - In-memory caching via `moka` for list and detail responses (TTL from config)
//! - Responses are normalized by `artisan_market_core::catalog`, so a
//!   malformed body degrades to an empty result instead of an error
//!
//! # Endpoints
//!
//! - `GET db/all` - every profile, `{ "user_profiles": [...] }`
//! - `GET user/{id}/profile` - a single profile, 404 when unknown
//! - `GET user/{id}/media` - generated images, `{ "items": [...] }`
//!
//! # Example
//!
//! ```rust,ignore
//! use artisan_market_storefront::profiles::ProfileClient;
//!
//! let client = ProfileClient::new(&config.profile_api);
//! let artisans = client.list_profiles().await?;
//! let media = client.list_media(&artisans[0].id).await?;
//! ```

mod cache;
mod client;

pub use client::ProfileClient;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when talking to the profile API.
#[derive(Debug, Error)]
pub enum ProfileApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Profile API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Endpoint URL could not be built.
    #[error("Invalid endpoint: {0}")]
    Url(#[from] url::ParseError),
}

/// One generated image from the media listing.
///
/// Only the fields the storefront reads are modelled; the rest are ignored.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct MediaItem {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    /// Base64 image payload; `null` when the API had no blob for the record.
    #[serde(default)]
    pub edited_image_base64: Option<String>,
}

/// Media listing body. A missing `items` key means no media.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct MediaListing {
    #[serde(default)]
    pub items: Option<Vec<MediaItem>>,
}

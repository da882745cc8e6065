//! Artisan images as data URIs.
//!
//! Converts generated media payloads and uploaded files into
//! `data:<mime>;base64,<payload>` strings and stores them in the image cache.

use artisan_market_core::ArtisanId;
use artisan_market_core::image_cache::{ImageCache, ImageKey};
use base64::{Engine, engine::general_purpose::STANDARD};
use thiserror::Error;

use crate::profiles::MediaItem;

/// Fallback MIME type when the payload's signature is not recognized.
const DEFAULT_MIME: &str = "image/png";

/// Errors converting image data.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("image payload is empty")]
    Empty,
    #[error("invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

/// Detect an image MIME type from its leading bytes.
#[must_use]
pub fn sniff_mime(bytes: &[u8]) -> &'static str {
    match bytes {
        [0x89, b'P', b'N', b'G', ..] => "image/png",
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [b'G', b'I', b'F', b'8', ..] => "image/gif",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
        _ => DEFAULT_MIME,
    }
}

/// Wrap a base64 payload as a data URI, validating it and sniffing its type.
///
/// A payload that already is a data URI has its prefix stripped first.
///
/// # Errors
///
/// Returns `MediaError` if the payload is blank or not valid base64.
pub fn data_uri_from_base64(payload: &str) -> Result<String, MediaError> {
    let payload = payload.trim();
    let payload = payload
        .split_once(";base64,")
        .filter(|(prefix, _)| prefix.starts_with("data:"))
        .map_or(payload, |(_, rest)| rest);

    if payload.is_empty() {
        return Err(MediaError::Empty);
    }

    let bytes = STANDARD.decode(payload)?;
    Ok(format!("data:{};base64,{payload}", sniff_mime(&bytes)))
}

/// Encode raw image bytes as a data URI.
///
/// A declared content type wins over sniffing when it is an image type.
///
/// # Errors
///
/// Returns `MediaError::Empty` if there are no bytes.
pub fn data_uri_from_bytes(bytes: &[u8], content_type: Option<&str>) -> Result<String, MediaError> {
    if bytes.is_empty() {
        return Err(MediaError::Empty);
    }
    let mime = content_type
        .filter(|ct| ct.starts_with("image/"))
        .unwrap_or_else(|| sniff_mime(bytes));
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

/// Cache every valid image of an artisan's media listing.
///
/// Valid images are stored as `Gallery(id, 0..)` in listing order, skipping
/// null or undecodable payloads without leaving gaps. The first one is also
/// stored as the artisan's portrait. Returns the cached data URIs.
pub fn populate_gallery(cache: &dyn ImageCache, artisan: &ArtisanId, items: &[MediaItem]) -> Vec<String> {
    let uris: Vec<String> = items
        .iter()
        .filter_map(|item| item.edited_image_base64.as_deref())
        .filter_map(|payload| match data_uri_from_base64(payload) {
            Ok(uri) => Some(uri),
            Err(e) => {
                tracing::warn!(artisan_id = %artisan, error = %e, "Skipping invalid media item");
                None
            }
        })
        .collect();

    for (index, uri) in uris.iter().enumerate() {
        cache.set(ImageKey::Gallery(artisan.clone(), index), uri.clone());
    }
    if let Some(first) = uris.first() {
        cache.set(ImageKey::Portrait(artisan.clone()), first.clone());
    }

    tracing::debug!(artisan_id = %artisan, count = uris.len(), "Populated gallery");
    uris
}

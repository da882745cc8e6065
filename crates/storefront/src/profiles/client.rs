//! Profile API client implementation.
//!
//! Caches the profile list and individual profiles using `moka`.

use std::sync::Arc;

use artisan_market_core::catalog::{parse_profile, parse_profiles};
use artisan_market_core::{ArtisanId, ArtisanProfile};
use moka::future::Cache;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use super::cache::{CacheKey, CacheValue};
use super::{MediaItem, MediaListing, ProfileApiError};
use crate::config::ProfileApiConfig;

/// Maximum characters of an error body kept for logs and errors.
const ERROR_BODY_CHARS: usize = 200;

// =============================================================================
// ProfileClient
// =============================================================================

/// Client for the artisan profile API.
///
/// Cheap to clone; all clones share the HTTP connection pool and the cache.
#[derive(Clone)]
pub struct ProfileClient {
    inner: Arc<ProfileClientInner>,
}

struct ProfileClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<CacheKey, CacheValue>,
}

impl ProfileClient {
    /// Create a new profile API client.
    #[must_use]
    pub fn new(config: &ProfileApiConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.cache_ttl)
            .build();

        Self {
            inner: Arc::new(ProfileClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                cache,
            }),
        }
    }

    /// GET a path relative to the base URL and parse the body as JSON.
    async fn get_json(&self, path: &str) -> Result<Value, ProfileApiError> {
        let url = self.inner.base_url.join(path)?;

        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ProfileApiError::NotFound(path.to_string()));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Profile API returned non-success status"
            );
            return Err(ProfileApiError::Status {
                status: status.as_u16(),
                body: response_text.chars().take(ERROR_BODY_CHARS).collect(),
            });
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %response_text.chars().take(500).collect::<String>(),
                "Failed to parse profile API response"
            );
            ProfileApiError::Parse(e)
        })
    }

    // =========================================================================
    // Profile Methods
    // =========================================================================

    /// Get every artisan profile.
    ///
    /// A body without a `user_profiles` array yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    #[instrument(skip(self))]
    pub async fn list_profiles(&self) -> Result<Vec<ArtisanProfile>, ProfileApiError> {
        if let Some(CacheValue::Profiles(profiles)) =
            self.inner.cache.get(&CacheKey::Profiles).await
        {
            debug!("Cache hit for profiles");
            return Ok(profiles);
        }

        let body = self.get_json("db/all").await?;
        let profiles = parse_profiles(&body);
        debug!(count = profiles.len(), "Fetched profiles");

        self.inner
            .cache
            .insert(CacheKey::Profiles, CacheValue::Profiles(profiles.clone()))
            .await;

        Ok(profiles)
    }

    /// Get a single artisan profile.
    ///
    /// # Errors
    ///
    /// Returns `ProfileApiError::NotFound` if the API answers 404 or an
    /// empty body, or another error if the request fails.
    #[instrument(skip(self), fields(artisan_id = %id))]
    pub async fn get_profile(&self, id: &ArtisanId) -> Result<ArtisanProfile, ProfileApiError> {
        let cache_key = CacheKey::Profile(id.clone());

        if let Some(CacheValue::Profile(profile)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for profile");
            return Ok(*profile);
        }

        let body = self.get_json(&user_path(id, "profile")?).await?;
        let mut profile = parse_profile(&body)
            .ok_or_else(|| ProfileApiError::NotFound(format!("artisan {id}")))?;

        // The detail endpoint may omit the id; the path is authoritative
        profile.id = id.clone();

        self.inner
            .cache
            .insert(cache_key, CacheValue::Profile(Box::new(profile.clone())))
            .await;

        Ok(profile)
    }

    /// List an artisan's generated media. Not cached: payloads are large and
    /// land in the image cache instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    #[instrument(skip(self), fields(artisan_id = %id))]
    pub async fn list_media(&self, id: &ArtisanId) -> Result<Vec<MediaItem>, ProfileApiError> {
        let body = self.get_json(&user_path(id, "media")?).await?;
        let listing: MediaListing = serde_json::from_value(body)?;
        Ok(listing.items.unwrap_or_default())
    }

    /// Check that the API answers its health endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the status is not success.
    pub async fn ping(&self) -> Result<(), ProfileApiError> {
        self.get_json("health").await.map(|_| ())
    }
}

/// Relative path for a per-artisan endpoint, with the id percent-encoded.
///
/// URL parsing resolves `.` and `..` segments even when percent-encoded
/// (`%2e`), so such ids can never name a profile and answer `NotFound`
/// instead of reaching a different endpoint.
fn user_path(id: &ArtisanId, endpoint: &str) -> Result<String, ProfileApiError> {
    let raw = id.as_str();
    if !raw.is_empty() && raw.chars().all(|c| c == '.') && raw.len() <= 2 {
        return Err(ProfileApiError::NotFound(format!("artisan {raw}")));
    }
    Ok(format!("user/{}/{endpoint}", urlencoding::encode(raw)))
}

//! Catalog service merging remote profiles with the demo artisans.

use artisan_market_core::catalog::{find_artisan, flatten_products};
use artisan_market_core::{ArtisanId, ArtisanProfile, CatalogProduct};
use tracing::instrument;

use crate::demo::demo_artisans;
use crate::profiles::{ProfileApiError, ProfileClient};

/// Read access to every artisan the storefront can show.
#[derive(Clone)]
pub struct Catalog {
    client: ProfileClient,
    demo: Vec<ArtisanProfile>,
}

impl Catalog {
    /// Create a catalog over `client`, optionally appending demo artisans.
    #[must_use]
    pub fn new(client: ProfileClient, include_demo: bool) -> Self {
        Self {
            client,
            demo: if include_demo { demo_artisans() } else { Vec::new() },
        }
    }

    /// The underlying profile API client.
    #[must_use]
    pub const fn client(&self) -> &ProfileClient {
        &self.client
    }

    /// Every artisan: remote profiles first, then the demo artisans.
    ///
    /// A failed remote fetch is logged and treated as no remote artisans.
    #[instrument(skip(self))]
    pub async fn artisans(&self) -> Vec<ArtisanProfile> {
        let mut artisans = self.client.list_profiles().await.unwrap_or_else(|e| {
            tracing::error!("Failed to fetch artisan profiles: {e}");
            Vec::new()
        });
        artisans.extend(self.demo.iter().cloned());
        artisans
    }

    /// Every product of every artisan, tagged with its artisan.
    pub async fn products(&self) -> Vec<CatalogProduct> {
        flatten_products(&self.artisans().await)
    }

    /// Look up one artisan.
    ///
    /// Checks the listing first, then asks the detail endpoint, so artisans
    /// missing from a stale list are still found.
    ///
    /// # Errors
    ///
    /// Returns `ProfileApiError::NotFound` for unknown artisans, or the
    /// detail request's error.
    #[instrument(skip(self), fields(artisan_id = %id))]
    pub async fn artisan(&self, id: &ArtisanId) -> Result<ArtisanProfile, ProfileApiError> {
        if let Some(artisan) = find_artisan(&self.artisans().await, id) {
            return Ok(artisan.clone());
        }
        self.client.get_profile(id).await
    }
}

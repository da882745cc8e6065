//! Application state shared across handlers.

use std::sync::Arc;

use artisan_market_core::image_cache::ImageCache;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::image_cache::MokaImageCache;
use crate::profiles::ProfileClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the catalog and the image cache.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    catalog: Catalog,
    images: Arc<dyn ImageCache>,
}

impl AppState {
    /// Create a new application state with a moka-backed image cache.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        let images = Arc::new(MokaImageCache::new(config.image_cache));
        Self::with_image_cache(config, images)
    }

    /// Create a new application state using the given image cache.
    #[must_use]
    pub fn with_image_cache(config: &StorefrontConfig, images: Arc<dyn ImageCache>) -> Self {
        let catalog = Catalog::new(ProfileClient::new(&config.profile_api), config.demo_catalog);

        Self {
            inner: Arc::new(AppStateInner { catalog, images }),
        }
    }

    /// Get a reference to the artisan catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the profile API client.
    #[must_use]
    pub fn profiles(&self) -> &ProfileClient {
        self.inner.catalog.client()
    }

    /// Get a reference to the image cache.
    #[must_use]
    pub fn images(&self) -> &dyn ImageCache {
        self.inner.images.as_ref()
    }
}

//! Cache types for profile API responses.

use artisan_market_core::{ArtisanId, ArtisanProfile};

/// Cache key for profile responses.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Profiles,
    Profile(ArtisanId),
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Profiles(Vec<ArtisanProfile>),
    Profile(Box<ArtisanProfile>),
}

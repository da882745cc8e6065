//! Image cache capability and storage keys.
//!
//! Artisan portraits and gallery images are cached as data URIs. The cache is
//! an explicit service handed to whoever needs it; implementations decide
//! storage, and report their [`EvictionPolicy`].

use core::fmt;

use crate::types::ArtisanId;

/// Key of a cached artisan image.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImageKey {
    /// The artisan's card/profile image.
    Portrait(ArtisanId),
    /// One image of the artisan's gallery, by position.
    Gallery(ArtisanId, usize),
}

impl ImageKey {
    /// Flat storage key (`artisan_image_<id>`, `artisan_gallery_<id>_<index>`).
    #[must_use]
    pub fn storage_key(&self) -> String {
        match self {
            Self::Portrait(id) => format!("artisan_image_{id}"),
            Self::Gallery(id, index) => format!("artisan_gallery_{id}_{index}"),
        }
    }

    /// The artisan this image belongs to.
    #[must_use]
    pub const fn artisan(&self) -> &ArtisanId {
        match self {
            Self::Portrait(id) | Self::Gallery(id, _) => id,
        }
    }
}

impl fmt::Display for ImageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.storage_key())
    }
}

/// How a cache bounds its size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvictionPolicy {
    /// Entries are never evicted or expired.
    #[default]
    Unbounded,
    /// At most this many entries are kept.
    MaxEntries(u64),
}

/// Key/value store of data-URI images.
pub trait ImageCache: Send + Sync {
    /// The stored data URI, if any.
    fn get(&self, key: &ImageKey) -> Option<String>;

    /// Store a data URI, overwriting any previous value.
    fn set(&self, key: ImageKey, data_uri: String);

    /// Whether a value is stored for `key`.
    fn has(&self, key: &ImageKey) -> bool {
        self.get(key).is_some()
    }

    /// The eviction policy this cache applies.
    fn policy(&self) -> EvictionPolicy;
}

//! Core types for the artisan catalog.
//!
//! Remote records are loosely typed; everything here is the normalized shape
//! produced by [`crate::catalog`].

pub mod artisan;
pub mod id;
pub mod materials;
pub mod price;

pub use artisan::{ArtisanProfile, Backstory, CatalogProduct, Product};
pub use id::*;
pub use materials::Materials;
pub use price::{CurrencyCode, Price, PriceRange};

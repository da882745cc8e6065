//! Artisan Market Core - catalog types and pure storefront logic.
//!
//! This crate provides the pieces shared by every Artisan Market component:
//! - `storefront` - Server-rendered marketplace site
//! - `cli` - Terminal tools for browsing the catalog
//!
//! # Architecture
//!
//! The core crate contains only types, traits and pure functions - no I/O, no
//! HTTP clients, no clocks. Time-dependent logic (the suggestion debounce)
//! takes `Instant`s as arguments so callers decide how time advances.
//!
//! # Modules
//!
//! - [`types`] - Artisan, product, price and materials types
//! - [`catalog`] - Normalizes the remote profile JSON into catalog types
//! - [`filter`] - Suggestion and category filters
//! - [`suggest`] - Debounced suggestion state machine
//! - [`image_cache`] - Image cache capability and storage keys

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod filter;
pub mod image_cache;
pub mod suggest;
pub mod types;

pub use types::*;

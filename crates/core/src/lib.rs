//! Gallery Core Library
//!
//! Domain model shared by the gallery caching and retrieval crates:
//! photo assets and their metadata, resolution tiers, and decoded image
//! payloads.
//!
//! This crate is deliberately free of locking and async machinery; it only
//! describes the data the cache and pipeline crates operate on.

mod asset;
mod image;
mod tier;

pub use asset::{AssetId, PhotoAsset};
pub use image::DecodedImage;
pub use tier::{CacheClass, FitMode, PixelSize, ResolutionTier};

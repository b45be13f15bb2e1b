//! Resolution tiers.
//!
//! A tier names a target rendition of an asset: the size the loader should
//! aim for and how the image is fitted into it. The tier is part of cache
//! identity, so the same asset cached at different tiers occupies
//! independent entries.

use serde::{Deserialize, Serialize};

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// How a loaded image is fitted into a tier's target size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FitMode {
    /// Fill the target, cropping overflow (grid thumbnails).
    Fill,
    /// Fit inside the target, preserving the full frame (fullscreen pages).
    Fit,
}

/// Which of the two cache stores a tier's entries occupy.
///
/// Thumbnails are small and numerous; full-resolution and high-quality
/// renditions are large and few, and share the full-image store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheClass {
    Thumbnail,
    FullImage,
}

/// A named target resolution/fit configuration for loading and caching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResolutionTier {
    /// Small square rendition for the grid, aspect-filled.
    Thumbnail,
    /// Native-resolution rendition for fullscreen viewing, aspect-fitted.
    Full,
    /// Bounded high-quality rendition for zoomed viewing, aspect-fitted.
    HighQuality,
}

impl ResolutionTier {
    /// Thumbnail target edge length in pixels.
    pub const THUMBNAIL_SIZE: u32 = 300;

    /// High-quality target edge length in pixels.
    pub const HIGH_QUALITY_SIZE: u32 = 1024;

    /// Target size the loader should aim for. `None` means the asset's
    /// native resolution.
    pub fn target_size(self) -> Option<PixelSize> {
        match self {
            Self::Thumbnail => Some(PixelSize::new(
                Self::THUMBNAIL_SIZE,
                Self::THUMBNAIL_SIZE,
            )),
            Self::Full => None,
            Self::HighQuality => Some(PixelSize::new(
                Self::HIGH_QUALITY_SIZE,
                Self::HIGH_QUALITY_SIZE,
            )),
        }
    }

    /// Fit mode the loader should apply to the target size.
    pub fn fit_mode(self) -> FitMode {
        match self {
            Self::Thumbnail => FitMode::Fill,
            Self::Full | Self::HighQuality => FitMode::Fit,
        }
    }

    /// Which cache store this tier's entries occupy.
    pub fn cache_class(self) -> CacheClass {
        match self {
            Self::Thumbnail => CacheClass::Thumbnail,
            Self::Full | Self::HighQuality => CacheClass::FullImage,
        }
    }

    /// Stable tag used to build cache keys. Tags are unique per tier and
    /// never contain the key separator.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Thumbnail => "thumb",
            Self::Full => "full",
            Self::HighQuality => "hq",
        }
    }

    /// All tiers, for iteration in tests and diagnostics.
    pub fn all() -> [ResolutionTier; 3] {
        [Self::Thumbnail, Self::Full, Self::HighQuality]
    }
}

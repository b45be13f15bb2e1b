//! Two-tier image cache front.
//!
//! Holds the two independent [`CacheStore`] instances the gallery uses:
//! one tuned for small, numerous thumbnails and one for large, few
//! full-resolution images. The stores have separate locks, so thumbnail
//! and full-image traffic never contend with each other.

use std::sync::Arc;

use gallery_core::{CacheClass, DecodedImage};

use crate::config::CacheConfig;
use crate::key::CacheKey;
use crate::store::{CacheStats, CacheStore};

/// Memory pressure level derived from cache utilization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MemoryPressure {
    /// Under half of the combined cost limit in use.
    Low,
    /// 50–75% in use.
    Moderate,
    /// 75–90% in use.
    High,
    /// Over 90% in use.
    Critical,
}

impl MemoryPressure {
    /// Pressure level for a utilization ratio (0.0 to 1.0).
    pub fn from_utilization(utilization: f64) -> Self {
        if utilization < 0.5 {
            MemoryPressure::Low
        } else if utilization < 0.75 {
            MemoryPressure::Moderate
        } else if utilization < 0.90 {
            MemoryPressure::High
        } else {
            MemoryPressure::Critical
        }
    }
}

/// Combined statistics for both stores.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCacheStats {
    /// Thumbnail store statistics.
    pub thumbnail: CacheStats,
    /// Full-image store statistics.
    pub full_image: CacheStats,
}

impl ImageCacheStats {
    /// Total cost across both stores in bytes.
    pub fn total_cost(&self) -> usize {
        self.thumbnail.total_cost + self.full_image.total_cost
    }

    /// Combined cost limit across both stores in bytes.
    pub fn total_cost_limit(&self) -> usize {
        self.thumbnail.cost_limit + self.full_image.cost_limit
    }

    /// Combined utilization ratio (0.0 to 1.0).
    pub fn utilization(&self) -> f64 {
        let limit = self.total_cost_limit();
        if limit == 0 {
            0.0
        } else {
            self.total_cost() as f64 / limit as f64
        }
    }
}

/// The gallery's in-memory image cache: a thumbnail store and a
/// full-image store behind one front.
///
/// Constructed once at startup and passed by `Arc` into the pipeline;
/// the memory-pressure monitor holds a weak registration so cache and
/// monitor lifecycles stay independent.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use gallery_cache::{CacheConfig, CacheKey, ImageCache};
/// use gallery_core::{AssetId, CacheClass, DecodedImage, ResolutionTier};
///
/// let cache = ImageCache::new(&CacheConfig::default());
/// let key = CacheKey::new(&AssetId::new("p1"), ResolutionTier::Thumbnail);
/// let image = Arc::new(DecodedImage::filled(300, 300, 0));
///
/// cache.store(CacheClass::Thumbnail).put(key.clone(), image, 360_000);
/// assert!(cache.store(CacheClass::Thumbnail).get(&key).is_some());
/// assert!(cache.store(CacheClass::FullImage).get(&key).is_none());
/// ```
pub struct ImageCache {
    thumbnails: CacheStore<CacheKey, Arc<DecodedImage>>,
    full_images: CacheStore<CacheKey, Arc<DecodedImage>>,
}

impl ImageCache {
    /// Create both stores with the limits from `config`.
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            thumbnails: CacheStore::new(
                config.thumbnail_count_limit,
                config.thumbnail_cost_limit,
            ),
            full_images: CacheStore::new(config.full_count_limit, config.full_cost_limit),
        }
    }

    /// The store backing a cache class.
    pub fn store(&self, class: CacheClass) -> &CacheStore<CacheKey, Arc<DecodedImage>> {
        match class {
            CacheClass::Thumbnail => &self.thumbnails,
            CacheClass::FullImage => &self.full_images,
        }
    }

    /// Drop every entry in both stores.
    ///
    /// Subsequent lookups miss until the stores are repopulated; losing
    /// contents is never an error, only added latency.
    pub fn clear_all(&self) {
        self.thumbnails.clear();
        self.full_images.clear();
        tracing::info!("image cache cleared");
    }

    /// Statistics for both stores.
    pub fn stats(&self) -> ImageCacheStats {
        ImageCacheStats {
            thumbnail: self.thumbnails.stats(),
            full_image: self.full_images.stats(),
        }
    }

    /// Current pressure level from combined utilization.
    pub fn pressure(&self) -> MemoryPressure {
        MemoryPressure::from_utilization(self.stats().utilization())
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

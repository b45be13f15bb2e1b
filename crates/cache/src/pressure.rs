//! Memory-pressure handling.
//!
//! The host environment delivers zero-argument pressure events at
//! unpredictable times. The monitor's job on each event is exactly one
//! synchronous clear pass over every registered cache: drop what exists
//! now. It does not cancel in-flight loads; their completions may
//! repopulate the caches, which is acceptable — pressure relief is not a
//! promise to refuse future growth.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::image_cache::ImageCache;

/// Process-wide memory-pressure monitor.
///
/// Constructed once alongside the caches and registered with each of
/// them; registrations are weak, so dropping a cache does not require
/// deregistration. Cleared caches remain fully usable — a pressure event
/// only increases the probability of a subsequent miss, it is never an
/// error.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use gallery_cache::{CacheConfig, ImageCache, MemoryPressureMonitor};
///
/// let cache = Arc::new(ImageCache::new(&CacheConfig::default()));
/// let monitor = MemoryPressureMonitor::new();
/// monitor.register(&cache);
///
/// // Host delivers a pressure event:
/// monitor.on_memory_pressure();
/// assert_eq!(cache.stats().total_cost(), 0);
/// ```
pub struct MemoryPressureMonitor {
    caches: Mutex<Vec<Weak<ImageCache>>>,
    events_handled: AtomicU64,
}

impl MemoryPressureMonitor {
    /// Create a monitor with no registrations.
    pub fn new() -> Self {
        Self {
            caches: Mutex::new(Vec::new()),
            events_handled: AtomicU64::new(0),
        }
    }

    /// Register a cache to be cleared on pressure events.
    ///
    /// The monitor holds only a weak reference; dropped caches are pruned
    /// on the next event.
    pub fn register(&self, cache: &Arc<ImageCache>) {
        let mut caches = self.caches.lock().unwrap();
        caches.push(Arc::downgrade(cache));
    }

    /// Handle one pressure event: a single synchronous clear pass over
    /// every live registered cache.
    pub fn on_memory_pressure(&self) {
        let mut caches = self.caches.lock().unwrap();
        caches.retain(|weak| match weak.upgrade() {
            Some(cache) => {
                cache.clear_all();
                true
            }
            None => false,
        });
        drop(caches);

        let events = self.events_handled.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(events, "memory pressure event handled");
    }

    /// Number of pressure events handled so far.
    pub fn events_handled(&self) -> u64 {
        self.events_handled.load(Ordering::Relaxed)
    }

    /// Number of live cache registrations.
    pub fn registered_caches(&self) -> usize {
        let caches = self.caches.lock().unwrap();
        caches.iter().filter(|weak| weak.strong_count() > 0).count()
    }
}

impl Default for MemoryPressureMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CacheConfig;
    use crate::key::CacheKey;
    use gallery_core::{AssetId, CacheClass, DecodedImage, ResolutionTier};

    fn populated_cache() -> Arc<ImageCache> {
        let cache = Arc::new(ImageCache::new(&CacheConfig::default()));
        let id = AssetId::new("p1");
        cache.store(CacheClass::Thumbnail).put(
            CacheKey::new(&id, ResolutionTier::Thumbnail),
            Arc::new(DecodedImage::filled(300, 300, 0)),
            360_000,
        );
        cache.store(CacheClass::FullImage).put(
            CacheKey::new(&id, ResolutionTier::Full),
            Arc::new(DecodedImage::filled(1024, 1024, 0)),
            1024 * 1024 * 4,
        );
        cache
    }

    #[test]
    fn test_pressure_clears_all_registered_caches() {
        let monitor = MemoryPressureMonitor::new();
        let a = populated_cache();
        let b = populated_cache();
        monitor.register(&a);
        monitor.register(&b);

        monitor.on_memory_pressure();

        for cache in [&a, &b] {
            let stats = cache.stats();
            assert_eq!(stats.thumbnail.entry_count, 0);
            assert_eq!(stats.full_image.entry_count, 0);
        }
        assert_eq!(monitor.events_handled(), 1);
    }

    #[test]
    fn test_one_clear_pass_per_event() {
        let monitor = MemoryPressureMonitor::new();
        let cache = populated_cache();
        monitor.register(&cache);

        monitor.on_memory_pressure();
        monitor.on_memory_pressure();

        assert_eq!(monitor.events_handled(), 2);
    }

    #[test]
    fn test_dropped_cache_is_pruned() {
        let monitor = MemoryPressureMonitor::new();
        let cache = populated_cache();
        monitor.register(&cache);
        assert_eq!(monitor.registered_caches(), 1);

        drop(cache);
        monitor.on_memory_pressure();

        assert_eq!(monitor.registered_caches(), 0);
    }

    #[test]
    fn test_cache_usable_after_clear() {
        let monitor = MemoryPressureMonitor::new();
        let cache = populated_cache();
        monitor.register(&cache);

        monitor.on_memory_pressure();

        let id = AssetId::new("p2");
        let key = CacheKey::new(&id, ResolutionTier::Thumbnail);
        cache.store(CacheClass::Thumbnail).put(
            key.clone(),
            Arc::new(DecodedImage::filled(300, 300, 1)),
            360_000,
        );
        assert!(cache.store(CacheClass::Thumbnail).get(&key).is_some());
    }
}

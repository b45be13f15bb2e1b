//! Get-or-load orchestration.
//!
//! Orchestrates a full image fetch: check the tier's cache store, on a
//! miss start (or join) the one in-flight load for the key, cache the
//! result, and hand it back. Loads run as detached tasks, so a caller
//! abandoning its fetch never cancels the underlying loader call or
//! starves the other waiters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::FutureExt;

use gallery_cache::{cost::image_cost, CacheKey, ImageCache};
use gallery_core::{AssetId, DecodedImage, ResolutionTier};

use crate::inflight::{InFlightTable, SharedFetch};
use crate::loader::AssetLoader;

/// Pipeline statistics snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineStats {
    /// Fetches answered from the cache.
    pub cache_hits: u64,

    /// Loader calls started.
    pub loads_started: u64,

    /// Fetches that joined an already-running load instead of starting
    /// their own.
    pub coalesced_waits: u64,

    /// Loads that produced no image.
    pub absent_results: u64,

    /// Loads currently outstanding.
    pub in_flight: usize,
}

#[derive(Default)]
struct Counters {
    cache_hits: AtomicU64,
    loads_started: AtomicU64,
    coalesced_waits: AtomicU64,
    absent_results: AtomicU64,
}

enum FetchPlan {
    Hit(Arc<DecodedImage>),
    Wait(SharedFetch),
}

/// Asynchronous image retrieval in front of the two-tier cache.
///
/// Constructed once at startup with the cache and loader injected by
/// reference; callers share the pipeline behind `Arc`. A fetch has
/// exactly two terminal outcomes: an image (from cache or a fresh load)
/// or `None` when the loader produced nothing. Loader failures are fully
/// absorbed here — absence is a normal, retryable state, and a later
/// fetch for the same key attempts the load again.
pub struct ImagePipeline {
    cache: Arc<ImageCache>,
    loader: Arc<dyn AssetLoader>,
    in_flight: Arc<InFlightTable>,
    counters: Arc<Counters>,
}

impl ImagePipeline {
    /// Create a pipeline over a cache and a loader.
    pub fn new(cache: Arc<ImageCache>, loader: Arc<dyn AssetLoader>) -> Self {
        Self {
            cache,
            loader,
            in_flight: Arc::new(InFlightTable::new()),
            counters: Arc::new(Counters::default()),
        }
    }

    /// Fetch an asset's rendition at a tier.
    ///
    /// Cache hit: returns immediately, promoting the entry's recency.
    /// Miss with a load already in flight for the same key: awaits that
    /// load's shared result without invoking the loader again. Otherwise
    /// starts the one load for this key, caches a successful result
    /// under the estimated cost, and resolves every waiter with the same
    /// outcome. Dropping a caller's future only abandons that caller's
    /// wait.
    pub async fn fetch(
        &self,
        asset_id: &AssetId,
        tier: ResolutionTier,
    ) -> Option<Arc<DecodedImage>> {
        let key = CacheKey::new(asset_id, tier);
        let store = self.cache.store(tier.cache_class());

        if let Some(image) = store.get(&key) {
            self.counters.cache_hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(key = %key, "cache hit");
            return Some(image);
        }

        let plan = {
            let mut in_flight = self.in_flight.lock();
            if let Some(existing) = in_flight.get(&key) {
                self.counters.coalesced_waits.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(key = %key, "joining in-flight load");
                FetchPlan::Wait(existing.clone())
            } else if let Some(image) = store.get(&key) {
                // The load completed between the miss above and taking
                // the table lock.
                FetchPlan::Hit(image)
            } else {
                let shared = self.spawn_load(key.clone(), asset_id.clone(), tier);
                in_flight.insert(key, shared.clone());
                FetchPlan::Wait(shared)
            }
        };

        match plan {
            FetchPlan::Hit(image) => {
                self.counters.cache_hits.fetch_add(1, Ordering::Relaxed);
                Some(image)
            }
            FetchPlan::Wait(fetch) => fetch.await,
        }
    }

    /// Start the one load for `key` as a detached task.
    ///
    /// The task itself caches the result and removes the in-flight entry
    /// on completion, so the load's lifecycle is independent of every
    /// caller.
    fn spawn_load(&self, key: CacheKey, asset_id: AssetId, tier: ResolutionTier) -> SharedFetch {
        self.counters.loads_started.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(key = %key, "starting load");

        let loader = Arc::clone(&self.loader);
        let cache = Arc::clone(&self.cache);
        let in_flight = Arc::clone(&self.in_flight);
        let counters = Arc::clone(&self.counters);

        let task = tokio::spawn(async move {
            let loaded = loader
                .load(&asset_id, tier.target_size(), tier.fit_mode())
                .await;

            let result = match loaded {
                Some(image) => {
                    let cost = image_cost(&image);
                    let image = Arc::new(image);
                    cache
                        .store(tier.cache_class())
                        .put(key.clone(), Arc::clone(&image), cost);
                    tracing::debug!(key = %key, cost, "load completed");
                    Some(image)
                }
                None => {
                    counters.absent_results.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!(key = %key, "load produced no image");
                    None
                }
            };

            // Completion is the only thing that removes the entry; the
            // next fetch for this key is served by the cache or starts a
            // fresh load.
            in_flight.remove(&key);
            result
        });

        // A panicked or aborted load resolves to absence, like any other
        // failed load.
        async move { task.await.ok().flatten() }.boxed().shared()
    }

    /// Current pipeline statistics.
    pub fn stats(&self) -> PipelineStats {
        PipelineStats {
            cache_hits: self.counters.cache_hits.load(Ordering::Relaxed),
            loads_started: self.counters.loads_started.load(Ordering::Relaxed),
            coalesced_waits: self.counters.coalesced_waits.load(Ordering::Relaxed),
            absent_results: self.counters.absent_results.load(Ordering::Relaxed),
            in_flight: self.in_flight.len(),
        }
    }

    /// The cache this pipeline populates.
    pub fn cache(&self) -> &Arc<ImageCache> {
        &self.cache
    }
}

//! End-to-end flow: configuration, caches, pressure monitor, and
//! pipeline wired together the way an application would assemble them.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use gallery_cache::{CacheConfig, ImageCache, MemoryPressureMonitor};
use gallery_core::{AssetId, DecodedImage, FitMode, PixelSize, ResolutionTier};
use gallery_pipeline::{spawn_pressure_listener, AssetLoader, ImagePipeline};

/// Loader over a fixed set of assets; unknown identifiers are absent.
struct StubPhotoStore {
    assets: HashMap<AssetId, (u32, u32)>,
    loads: AtomicU64,
}

impl StubPhotoStore {
    fn new(assets: &[(&str, u32, u32)]) -> Arc<Self> {
        Arc::new(Self {
            assets: assets
                .iter()
                .map(|&(id, w, h)| (AssetId::new(id), (w, h)))
                .collect(),
            loads: AtomicU64::new(0),
        })
    }

    fn loads(&self) -> u64 {
        self.loads.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl AssetLoader for StubPhotoStore {
    async fn load(
        &self,
        asset_id: &AssetId,
        target_size: Option<PixelSize>,
        _fit_mode: FitMode,
    ) -> Option<DecodedImage> {
        self.loads.fetch_add(1, Ordering::Relaxed);
        let &(width, height) = self.assets.get(asset_id)?;

        // Renditions never exceed the tier's bound.
        let (width, height) = match target_size {
            Some(bound) => (width.min(bound.width), height.min(bound.height)),
            None => (width, height),
        };
        Some(DecodedImage::filled(width, height, 0))
    }
}

fn assemble(
    config: CacheConfig,
    store: Arc<StubPhotoStore>,
) -> (Arc<ImageCache>, Arc<MemoryPressureMonitor>, ImagePipeline) {
    let cache = Arc::new(ImageCache::new(&config));
    let monitor = Arc::new(MemoryPressureMonitor::new());
    monitor.register(&cache);
    let pipeline = ImagePipeline::new(Arc::clone(&cache), store);
    (cache, monitor, pipeline)
}

#[tokio::test]
async fn test_gallery_session_flow() {
    let store = StubPhotoStore::new(&[
        ("p1", 4032, 3024),
        ("p2", 3024, 4032),
        ("p3", 2048, 1536),
    ]);
    let (cache, _monitor, pipeline) = assemble(CacheConfig::default(), Arc::clone(&store));

    // Grid comes up: thumbnails for every asset.
    for id in ["p1", "p2", "p3"] {
        let image = pipeline
            .fetch(&AssetId::new(id), ResolutionTier::Thumbnail)
            .await
            .expect("thumbnail load");
        assert!(image.width() <= 300 && image.height() <= 300);
    }
    assert_eq!(store.loads(), 3);
    assert_eq!(cache.stats().thumbnail.entry_count, 3);

    // Scrolling back over the grid is all cache hits.
    for id in ["p1", "p2", "p3"] {
        pipeline
            .fetch(&AssetId::new(id), ResolutionTier::Thumbnail)
            .await
            .expect("cached thumbnail");
    }
    assert_eq!(store.loads(), 3);

    // Opening one photo fullscreen loads the full rendition only.
    let full = pipeline
        .fetch(&AssetId::new("p1"), ResolutionTier::Full)
        .await
        .expect("full image load");
    assert_eq!(full.width(), 4032);
    assert_eq!(store.loads(), 4);
    assert_eq!(cache.stats().full_image.entry_count, 1);

    // A deleted asset is absent, not an error, and stays retryable.
    assert!(pipeline
        .fetch(&AssetId::new("gone"), ResolutionTier::Thumbnail)
        .await
        .is_none());
    assert!(pipeline
        .fetch(&AssetId::new("gone"), ResolutionTier::Thumbnail)
        .await
        .is_none());
    assert_eq!(store.loads(), 6);
}

#[tokio::test]
async fn test_memory_pressure_round_trip() {
    let store = StubPhotoStore::new(&[("p1", 4032, 3024)]);
    let (cache, monitor, pipeline) = assemble(CacheConfig::default(), Arc::clone(&store));

    let (tx, rx) = mpsc::channel(1);
    let listener = spawn_pressure_listener(Arc::clone(&monitor), rx);

    pipeline
        .fetch(&AssetId::new("p1"), ResolutionTier::Thumbnail)
        .await
        .expect("thumbnail load");
    assert_eq!(cache.stats().thumbnail.entry_count, 1);

    // Host reports memory pressure; both stores drop everything.
    tx.send(()).await.unwrap();
    drop(tx);
    listener.await.unwrap();

    let stats = cache.stats();
    assert_eq!(stats.thumbnail.entry_count, 0);
    assert_eq!(stats.full_image.entry_count, 0);

    // The cleared cache repopulates on the next fetch.
    pipeline
        .fetch(&AssetId::new("p1"), ResolutionTier::Thumbnail)
        .await
        .expect("reload after pressure");
    assert_eq!(store.loads(), 2);
    assert_eq!(cache.stats().thumbnail.entry_count, 1);
}

#[tokio::test]
async fn test_bounded_stores_under_browsing() {
    // Tight limits: the full store keeps at most two entries and 40 MB.
    let config = CacheConfig::default()
        .with_thumbnail_limits(4, 4 * 360_000)
        .with_full_limits(2, 40 * 1024 * 1024);
    let store = StubPhotoStore::new(&[
        ("p1", 2048, 1536),
        ("p2", 2048, 1536),
        ("p3", 2048, 1536),
        ("p4", 2048, 1536),
        ("p5", 2048, 1536),
        ("p6", 2048, 1536),
    ]);
    let (cache, _monitor, pipeline) = assemble(config, Arc::clone(&store));

    // Paging through every photo fullscreen overflows the full store.
    for id in ["p1", "p2", "p3", "p4", "p5", "p6"] {
        pipeline
            .fetch(&AssetId::new(id), ResolutionTier::Full)
            .await
            .expect("full image load");

        let stats = cache.stats().full_image;
        assert!(stats.entry_count <= 2);
        assert!(stats.total_cost <= 40 * 1024 * 1024);
    }
    assert!(cache.stats().full_image.evictions >= 4);

    // Only the most recently viewed photos are still cached.
    pipeline
        .fetch(&AssetId::new("p6"), ResolutionTier::Full)
        .await
        .expect("recent photo cached");
    assert_eq!(store.loads(), 6);
}

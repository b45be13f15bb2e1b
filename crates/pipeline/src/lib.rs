//! Gallery Pipeline Library
//!
//! Asynchronous get-or-load orchestration in front of the image cache.
//!
//! A fetch checks the tier's cache store, and on a miss asks the asset
//! loader for a fresh rendition, caches the result, and returns it.
//! Concurrent fetches for the same (asset, tier) pair are coalesced: the
//! first caller starts exactly one loader call and every later caller
//! awaits the same shared result. Loader failures surface as absence,
//! never as errors.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use gallery_cache::{CacheConfig, ImageCache, MemoryPressureMonitor};
//! use gallery_core::{AssetId, ResolutionTier};
//! use gallery_pipeline::{AssetLoader, ImagePipeline};
//!
//! # async fn example(loader: Arc<dyn AssetLoader>) {
//! let cache = Arc::new(ImageCache::new(&CacheConfig::default()));
//! let monitor = MemoryPressureMonitor::new();
//! monitor.register(&cache);
//!
//! let pipeline = ImagePipeline::new(cache, loader);
//! let image = pipeline
//!     .fetch(&AssetId::new("photo-1"), ResolutionTier::Thumbnail)
//!     .await;
//! # }
//! ```

mod inflight;
mod loader;
mod monitor;
mod pipeline;

pub use loader::AssetLoader;
pub use monitor::spawn_pressure_listener;
pub use pipeline::{ImagePipeline, PipelineStats};

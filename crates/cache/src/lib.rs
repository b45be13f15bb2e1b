//! Gallery Cache Library
//!
//! Bounded, cost-aware in-memory image caching with LRU eviction.
//!
//! The cache is split into two independent stores: one tuned for small,
//! numerous thumbnail entries and one for large, few full-resolution
//! entries. Both are purely in-memory and reconstructible from the asset
//! store at any time; losing cache contents is never an error, only added
//! latency on the next fetch.

pub mod config;
pub mod cost;
pub mod image_cache;
pub mod key;
pub mod pressure;
pub mod store;

pub use config::{CacheConfig, ConfigError};
pub use cost::{estimated_cost, BYTES_PER_PIXEL};
pub use image_cache::{ImageCache, ImageCacheStats, MemoryPressure};
pub use key::CacheKey;
pub use pressure::MemoryPressureMonitor;
pub use store::{CacheStats, CacheStore};

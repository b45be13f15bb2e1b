//! In-flight request table.
//!
//! Tracks the one outstanding load per cache key as a shared future.
//! An entry exists only between the first request for a key and the
//! completion of its load; the loading task removes it on completion —
//! success, absence, or panic — no matter how many callers awaited it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::{BoxFuture, Shared};
use gallery_cache::CacheKey;
use gallery_core::DecodedImage;

/// The shared result of one in-flight load. Cloning is cheap and every
/// clone resolves to the same outcome.
pub(crate) type SharedFetch = Shared<BoxFuture<'static, Option<Arc<DecodedImage>>>>;

/// Keyed table of in-flight loads, guarded by its own mutex.
///
/// Lock discipline: a cache-store lock is never held while this table's
/// lock is taken, so holding the table lock across a store lookup cannot
/// deadlock.
#[derive(Default)]
pub(crate) struct InFlightTable {
    entries: Mutex<HashMap<CacheKey, SharedFetch>>,
}

impl InFlightTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Lock the table for a check-then-insert sequence.
    pub(crate) fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, SharedFetch>> {
        self.entries.lock().unwrap()
    }

    /// Remove a completed entry. Called exactly once per load, by the
    /// loading task itself.
    pub(crate) fn remove(&self, key: &CacheKey) {
        let mut entries = self.entries.lock().unwrap();
        entries.remove(key);
    }

    /// Number of loads currently outstanding.
    pub(crate) fn len(&self) -> usize {
        let entries = self.entries.lock().unwrap();
        entries.len()
    }
}

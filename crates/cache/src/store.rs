//! Bounded key→value store with LRU eviction.
//!
//! Provides a generic in-memory store bounded by both an entry count limit
//! and a cumulative cost limit. When either limit would be exceeded, the
//! least recently used entries are evicted (ties broken by insertion
//! order) until both invariants hold again.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::sync::{Arc, Mutex};

/// Statistics about store usage.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    /// Number of entries currently in the store.
    pub entry_count: usize,

    /// Sum of the costs of all current entries (bytes).
    pub total_cost: usize,

    /// Maximum number of entries allowed.
    pub count_limit: usize,

    /// Maximum cumulative cost allowed (bytes).
    pub cost_limit: usize,

    /// Number of lookups that found an entry.
    pub hits: u64,

    /// Number of lookups that found nothing.
    pub misses: u64,

    /// Number of entries evicted to satisfy the limits.
    pub evictions: u64,
}

impl CacheStats {
    /// Fraction of lookups that hit (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Fraction of the cost limit currently in use (0.0 to 1.0).
    pub fn cost_utilization(&self) -> f64 {
        if self.cost_limit == 0 {
            0.0
        } else {
            self.total_cost as f64 / self.cost_limit as f64
        }
    }
}

struct Entry<V> {
    value: V,
    cost: usize,
}

/// Internal store state, guarded by the store's mutex.
struct StoreState<K, V> {
    entries: HashMap<K, Entry<V>>,

    /// Recency queue: least recently used at the front, most recent at
    /// the back. Keys appear exactly once.
    lru_queue: VecDeque<K>,

    total_cost: usize,
    count_limit: usize,
    cost_limit: usize,
    stats: CacheStats,
}

impl<K, V> StoreState<K, V>
where
    K: Eq + Hash + Clone,
{
    fn new(count_limit: usize, cost_limit: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru_queue: VecDeque::new(),
            total_cost: 0,
            count_limit,
            cost_limit,
            stats: CacheStats {
                count_limit,
                cost_limit,
                ..Default::default()
            },
        }
    }

    /// Mark a key most recently used.
    fn touch(&mut self, key: &K) {
        self.lru_queue.retain(|k| k != key);
        self.lru_queue.push_back(key.clone());
    }

    /// Evict the least recently used entry. Returns false if empty.
    fn evict_lru(&mut self) -> bool {
        let Some(key) = self.lru_queue.pop_front() else {
            return false;
        };
        if let Some(entry) = self.entries.remove(&key) {
            self.total_cost = self.total_cost.saturating_sub(entry.cost);
            self.stats.evictions += 1;
        }
        self.sync_stats();
        true
    }

    /// Evict until an incoming entry of `incoming_cost` fits both limits,
    /// or the store is empty. An entry whose own cost exceeds the cost
    /// limit therefore ends up admitted alone, and becomes the first
    /// eviction candidate on the next insert.
    fn evict_to_fit(&mut self, incoming_cost: usize) {
        while !self.entries.is_empty()
            && (self.entries.len() + 1 > self.count_limit
                || self.total_cost + incoming_cost > self.cost_limit)
        {
            if !self.evict_lru() {
                break;
            }
        }
    }

    fn sync_stats(&mut self) {
        self.stats.entry_count = self.entries.len();
        self.stats.total_cost = self.total_cost;
    }
}

/// Bounded key→value store with LRU eviction.
///
/// Thread-safe: all operations lock a single internal mutex, so a `put`
/// is atomic with respect to concurrent `get`/`put` on the same store.
/// Independent stores never contend with each other.
///
/// # Example
///
/// ```
/// use gallery_cache::CacheStore;
///
/// // Up to 2 entries and 1 MB of cumulative cost.
/// let store: CacheStore<String, Vec<u8>> = CacheStore::new(2, 1024 * 1024);
///
/// store.put("a".to_owned(), vec![0u8; 16], 400_000);
/// store.put("b".to_owned(), vec![1u8; 16], 400_000);
/// assert!(store.get(&"a".to_owned()).is_some());
///
/// // Inserting a third entry evicts the least recently used one.
/// store.put("c".to_owned(), vec![2u8; 16], 400_000);
/// assert!(store.get(&"b".to_owned()).is_none());
/// ```
pub struct CacheStore<K, V> {
    state: Arc<Mutex<StoreState<K, V>>>,
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a store bounded by `count_limit` entries and `cost_limit`
    /// cumulative cost in bytes. Both limits should be non-zero; a zero
    /// limit degenerates to a store that holds at most the last insert.
    pub fn new(count_limit: usize, cost_limit: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState::new(count_limit, cost_limit))),
        }
    }

    /// Look up a value and mark it most recently used.
    ///
    /// Does not change the entry count or total cost.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut state = self.state.lock().unwrap();

        if let Some(value) = state.entries.get(key).map(|e| e.value.clone()) {
            state.touch(key);
            state.stats.hits += 1;
            Some(value)
        } else {
            state.stats.misses += 1;
            None
        }
    }

    /// Insert or replace an entry.
    ///
    /// Replacing an existing key updates its recency and re-accounts its
    /// cost. If the insert would exceed either limit, least recently used
    /// entries are evicted first (insertion order breaks ties) until both
    /// `count ≤ count_limit` and `total_cost ≤ cost_limit` hold. An entry
    /// whose own cost exceeds the cost limit is admitted only after
    /// everything else has been evicted, and then stands alone.
    pub fn put(&self, key: K, value: V, cost: usize) {
        let mut state = self.state.lock().unwrap();

        if let Some(old) = state.entries.remove(&key) {
            state.total_cost = state.total_cost.saturating_sub(old.cost);
            state.lru_queue.retain(|k| k != &key);
        }

        state.evict_to_fit(cost);

        state.total_cost += cost;
        state.entries.insert(key.clone(), Entry { value, cost });
        state.lru_queue.push_back(key);
        state.sync_stats();
    }

    /// Whether a key is present, without promoting its recency.
    pub fn contains(&self, key: &K) -> bool {
        let state = self.state.lock().unwrap();
        state.entries.contains_key(key)
    }

    /// Remove an entry, returning its value if it was present.
    pub fn remove(&self, key: &K) -> Option<V> {
        let mut state = self.state.lock().unwrap();

        let entry = state.entries.remove(key)?;
        state.total_cost = state.total_cost.saturating_sub(entry.cost);
        state.lru_queue.retain(|k| k != key);
        state.sync_stats();
        Some(entry.value)
    }

    /// Remove all entries, returning the store to its initial empty
    /// state. Subsequent lookups miss until the store is repopulated.
    pub fn clear(&self) {
        let mut state = self.state.lock().unwrap();
        state.entries.clear();
        state.lru_queue.clear();
        state.total_cost = 0;
        state.sync_stats();
    }

    /// Current statistics. Read-only; does not touch recency.
    pub fn stats(&self) -> CacheStats {
        let state = self.state.lock().unwrap();
        state.stats
    }

    /// Number of entries currently in the store.
    pub fn len(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of the costs of all current entries.
    pub fn total_cost(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.total_cost
    }
}

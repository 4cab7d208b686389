//! Bounded, time-limited score cache.
//!
//! [`ScoreCache`] memoizes computed metric scores keyed by the full
//! (metric, image, reference) tuple. Entries expire after a fixed TTL,
//! checked lazily on lookup; when the cache is full the least recently
//! accessed entry is evicted to make room. All operations run under a
//! single mutex whose critical section covers only the map bookkeeping,
//! never a scoring call.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::catalog::Metric;

/// Default maximum number of cached scores.
pub const DEFAULT_CACHE_SIZE: usize = 1000;

/// Default time-to-live for cached scores.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Cache key: the identity of one score computation.
///
/// The reference path is typed as an `Option`, so a request without a
/// reference can never collide with a request that has one — no string
/// sentinel needed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    /// Metric that was computed.
    pub metric: Metric,
    /// Test image path.
    pub image: PathBuf,
    /// Reference image path, if the metric used one.
    pub reference: Option<PathBuf>,
}

impl CacheKey {
    /// Build a key from the parts of a score request.
    #[must_use]
    pub fn new(metric: Metric, image: &Path, reference: Option<&Path>) -> Self {
        Self {
            metric,
            image: image.to_path_buf(),
            reference: reference.map(Path::to_path_buf),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    value: f64,
    created_at: Instant,
    last_accessed: Instant,
}

/// Bounded LRU score cache with absolute TTL expiry.
///
/// Capacity and TTL are fixed at construction. Thread-safe; `get`, `put`
/// and `clear` each take the internal lock for the duration of their map
/// operations only.
#[derive(Debug)]
pub struct ScoreCache {
    max_size: usize,
    ttl: Duration,
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl Default for ScoreCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_SIZE, DEFAULT_CACHE_TTL)
    }
}

impl ScoreCache {
    /// Create a cache holding at most `max_size` entries, each live for
    /// at most `ttl` after insertion.
    #[must_use]
    pub fn new(max_size: usize, ttl: Duration) -> Self {
        Self {
            max_size,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Look up a cached score.
    ///
    /// An entry older than the TTL is removed and treated as absent; the
    /// expiry check runs before any recency bookkeeping, so an expired
    /// entry is never resurrected by being accessed. A live hit refreshes
    /// the entry's last-accessed time.
    #[must_use]
    pub fn get(&self, key: &CacheKey) -> Option<f64> {
        let now = Instant::now();
        let mut entries = self.entries.lock().unwrap();

        let expired = match entries.get(key) {
            None => return None,
            Some(entry) => now.duration_since(entry.created_at) > self.ttl,
        };
        if expired {
            entries.remove(key);
            tracing::debug!(metric = %key.metric, "cache entry expired");
            return None;
        }

        entries.get_mut(key).map(|entry| {
            entry.last_accessed = now;
            entry.value
        })
    }

    /// Insert a computed score.
    ///
    /// If the cache is at capacity the entry with the oldest
    /// last-accessed time is evicted first; ties break deterministically
    /// by key order.
    pub fn put(&self, key: CacheKey, value: f64) {
        if self.max_size == 0 {
            return;
        }
        let now = Instant::now();
        let mut entries = self.entries.lock().unwrap();

        if !entries.contains_key(&key) && entries.len() >= self.max_size {
            let lru = entries
                .iter()
                .min_by(|a, b| {
                    a.1.last_accessed
                        .cmp(&b.1.last_accessed)
                        .then_with(|| a.0.cmp(b.0))
                })
                .map(|(k, _)| k.clone());
            if let Some(lru_key) = lru {
                entries.remove(&lru_key);
                tracing::debug!(metric = %lru_key.metric, "cache full, evicted LRU entry");
            }
        }

        entries.insert(
            key,
            CacheEntry {
                value,
                created_at: now,
                last_accessed: now,
            },
        );
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    /// Number of stored entries, including any not yet purged by lazy
    /// expiry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configured capacity.
    #[must_use]
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Configured time-to-live.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

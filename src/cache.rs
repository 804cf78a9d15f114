use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;

use crate::types::MatchVerdict;

/// Default LRU cache size
pub const DEFAULT_CACHE_SIZE: usize = 1024;

/// Memoization capability for resolved verdicts, keyed by the canonical
/// input string.
///
/// Implementations must never expose a partially-written entry. Two
/// callers racing on the same missing key may both compute the verdict;
/// the results are equal, so whichever `set` lands last leaves the
/// cache consistent.
pub trait VerdictCache: Send + Sync {
    /// Look up the verdict for a canonical domain string.
    fn get(&self, key: &str) -> Option<MatchVerdict>;

    /// Store the verdict for a canonical domain string.
    fn set(&self, key: &str, verdict: MatchVerdict);

    /// Drop every cached entry.
    fn clear(&self);
}

/// Bounded LRU verdict cache.
pub struct LruVerdictCache {
    inner: Mutex<LruCache<String, MatchVerdict>>,
}

impl LruVerdictCache {
    /// Create a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(1).unwrap());
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }
}

impl Default for LruVerdictCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_SIZE)
    }
}

impl VerdictCache for LruVerdictCache {
    fn get(&self, key: &str) -> Option<MatchVerdict> {
        self.inner.lock().get(key).cloned()
    }

    fn set(&self, key: &str, verdict: MatchVerdict) {
        self.inner.lock().put(key.to_string(), verdict);
    }

    fn clear(&self) {
        self.inner.lock().clear();
    }
}

/// Cache that never stores anything; every lookup re-runs the matcher.
pub struct NoopVerdictCache;

impl VerdictCache for NoopVerdictCache {
    fn get(&self, _key: &str) -> Option<MatchVerdict> {
        None
    }

    fn set(&self, _key: &str, _verdict: MatchVerdict) {}

    fn clear(&self) {}
}

//! Short-lived price cache.
//!
//! Absorbs request bursts against the public oracle API. Entries expire
//! after a configurable TTL; there is no eviction beyond overwrite since
//! the key space (token x currency) is tiny.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
struct CachedPrice {
    price: f64,
    fetched_at: Instant,
}

/// A thread-safe TTL cache of oracle prices keyed by (id, currency).
#[derive(Clone)]
pub struct PriceCache {
    inner: Arc<DashMap<(String, String), CachedPrice>>,
    ttl: Duration,
}

impl PriceCache {
    /// Create a cache whose entries stay fresh for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// Get a price if a fresh entry exists.
    pub fn get(&self, id: &str, currency: &str) -> Option<f64> {
        let key = (id.to_string(), currency.to_string());
        let entry = self.inner.get(&key)?;
        if entry.fetched_at.elapsed() < self.ttl {
            Some(entry.price)
        } else {
            None
        }
    }

    /// Store a freshly fetched price.
    pub fn put(&self, id: &str, currency: &str, price: f64) {
        self.inner.insert(
            (id.to_string(), currency.to_string()),
            CachedPrice {
                price,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Number of entries, fresh or stale.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the cache holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_entry_is_returned() {
        let cache = PriceCache::new(Duration::from_secs(60));
        cache.put("solana", "usd", 150.0);

        assert_eq!(cache.get("solana", "usd"), Some(150.0));
        assert_eq!(cache.get("solana", "idr"), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_zero_ttl_never_hits() {
        let cache = PriceCache::new(Duration::ZERO);
        cache.put("ethereum", "usd", 3000.0);

        assert_eq!(cache.get("ethereum", "usd"), None);
        // The stale entry still occupies its slot until overwritten.
        assert!(!cache.is_empty());
    }

    #[test]
    fn test_overwrite_refreshes() {
        let cache = PriceCache::new(Duration::from_secs(60));
        cache.put("bitcoin", "idr", 1.0);
        cache.put("bitcoin", "idr", 2.0);

        assert_eq!(cache.get("bitcoin", "idr"), Some(2.0));
        assert_eq!(cache.len(), 1);
    }
}

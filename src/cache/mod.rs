// file: src/cache/mod.rs
// description: pluggable read-through response cache with a fixed time-to-live
// reference: https://docs.rs/parking_lot

use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Key/value cache shared across requests. Never required for correctness.
pub trait ResponseCache: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn insert(&self, key: String, value: String);
}

/// Hashes a namespace and its key parts into a compact cache key.
pub fn cache_key(namespace: &str, parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(namespace.as_bytes());
    for part in parts {
        hasher.update([0u8]);
        hasher.update(part.as_bytes());
    }
    format!("{}:{:x}", namespace, hasher.finalize())
}

struct Entries {
    values: HashMap<String, (Instant, String)>,
    last_purge: Instant,
}

impl Entries {
    fn purge(&mut self, ttl: Duration) -> usize {
        let before = self.values.len();
        self.values
            .retain(|_, (stored_at, _)| stored_at.elapsed() < ttl);
        self.last_purge = Instant::now();
        before - self.values.len()
    }
}

/// Expired entries are swept on insert at most once per TTL period.
pub struct TtlCache {
    ttl: Duration,
    entries: Mutex<Entries>,
}

impl TtlCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(Entries {
                values: HashMap::new(),
                last_purge: Instant::now(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().values.is_empty()
    }

    pub fn purge_expired(&self) -> usize {
        self.entries.lock().purge(self.ttl)
    }
}

impl ResponseCache for TtlCache {
    fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock();
        let expired = match entries.values.get(key) {
            Some((stored_at, value)) if stored_at.elapsed() < self.ttl => {
                debug!("Cache hit: {}", key);
                return Some(value.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            entries.values.remove(key);
        }
        None
    }

    fn insert(&self, key: String, value: String) {
        let mut entries = self.entries.lock();
        if entries.last_purge.elapsed() >= self.ttl {
            let removed = entries.purge(self.ttl);
            if removed > 0 {
                debug!("Purged {} expired cache entries", removed);
            }
        }
        entries.values.insert(key, (Instant::now(), value));
    }
}

/// Cache that stores nothing; used when caching is disabled.
pub struct NoopCache;

impl ResponseCache for NoopCache {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn insert(&self, _key: String, _value: String) {}
}

pub fn build_cache(enabled: bool, ttl: Duration) -> Arc<dyn ResponseCache> {
    if enabled {
        Arc::new(TtlCache::new(ttl))
    } else {
        Arc::new(NoopCache)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_cache_roundtrip() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("k".to_string(), "v".to_string());
        assert_eq!(cache.get("k"), Some("v".to_string()));
        assert_eq!(cache.get("missing"), None);
    }

    #[test]
    fn test_expired_entries_are_dropped() {
        let cache = TtlCache::new(Duration::ZERO);
        cache.insert("k".to_string(), "v".to_string());
        assert_eq!(cache.get("k"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_purge_expired() {
        let cache = TtlCache::new(Duration::from_millis(50));
        cache.insert("a".to_string(), "1".to_string());
        cache.insert("b".to_string(), "2".to_string());
        std::thread::sleep(Duration::from_millis(60));
        assert_eq!(cache.purge_expired(), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_insert_sweeps_expired_entries() {
        let cache = TtlCache::new(Duration::from_millis(1));
        for i in 0..1000 {
            cache.insert(format!("k{}", i), "v".to_string());
        }
        std::thread::sleep(Duration::from_millis(20));

        cache.insert("fresh".to_string(), "v".to_string());
        assert_eq!(cache.get("k0"), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_live_entries_survive_sweep() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("a".to_string(), "1".to_string());
        cache.insert("b".to_string(), "2".to_string());
        assert_eq!(cache.purge_expired(), 0);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_noop_cache_never_hits() {
        let cache = NoopCache;
        cache.insert("k".to_string(), "v".to_string());
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn test_cache_key_separates_parts() {
        assert_ne!(cache_key("t", &["ab", "c"]), cache_key("t", &["a", "bc"]));
        assert!(cache_key("model", &["prompt"]).starts_with("model:"));
    }
}

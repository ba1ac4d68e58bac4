//! TTL cache store and periodic sweeper.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// Default entry lifetime when the caller does not supply one.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

struct CacheEntry<T> {
    value: T,
    created_at: Instant,
    ttl: Duration,
}

impl<T> CacheEntry<T> {
    fn new(value: T, ttl: Duration) -> Self {
        Self {
            value,
            created_at: Instant::now(),
            ttl,
        }
    }

    fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.ttl
    }
}

/// Live cache contents snapshot. Expired entries are swept before the
/// snapshot is taken, so `keys` never lists a stale entry.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub size: usize,
    pub keys: Vec<String>,
}

/// Generic in-memory key-value store with per-entry expiry.
///
/// Unbounded in size: the only eviction is TTL expiry, enforced lazily on
/// read and proactively by [`TtlCache::sweep`]. Cloning is cheap; clones
/// share the same underlying map, so a clone can be handed to the sweeper
/// task or the HTTP state while the service keeps its own.
///
/// Operations never hold the lock across an await point, so each call is
/// atomic from the caller's perspective.
pub struct TtlCache<T> {
    entries: Arc<RwLock<HashMap<String, CacheEntry<T>>>>,
    default_ttl: Duration,
}

impl<T> Clone for TtlCache<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            default_ttl: self.default_ttl,
        }
    }
}

impl<T> Default for TtlCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TtlCache<T> {
    pub fn new() -> Self {
        Self::with_default_ttl(DEFAULT_TTL)
    }

    pub fn with_default_ttl(default_ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            default_ttl,
        }
    }

    /// Insert or overwrite the entry for `key` with the default TTL.
    pub fn set(&self, key: &str, value: T) {
        self.set_with_ttl(key, value, self.default_ttl);
    }

    /// Insert or overwrite the entry for `key`, stamping the current time.
    pub fn set_with_ttl(&self, key: &str, value: T, ttl: Duration) {
        let mut entries = self.entries.write().unwrap();
        entries.insert(key.to_string(), CacheEntry::new(value, ttl));
    }

    /// Remove the entry unconditionally. Returns whether one existed.
    pub fn delete(&self, key: &str) -> bool {
        self.entries.write().unwrap().remove(key).is_some()
    }

    /// Remove all entries.
    pub fn clear(&self) {
        self.entries.write().unwrap().clear();
    }

    /// Remove every expired entry, returning how many were evicted.
    pub fn sweep(&self) -> usize {
        let mut entries = self.entries.write().unwrap();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        before - entries.len()
    }

    /// Entry count and key listing of live entries only.
    pub fn stats(&self) -> CacheStats {
        self.sweep();
        let entries = self.entries.read().unwrap();
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort();
        CacheStats {
            size: entries.len(),
            keys,
        }
    }
}

impl<T: Clone> TtlCache<T> {
    /// Return the stored value if present and unexpired.
    ///
    /// An entry found expired is removed as a side effect; no entry survives
    /// being read past its TTL.
    pub fn get(&self, key: &str) -> Option<T> {
        let mut entries = self.entries.write().unwrap();
        match entries.get(key) {
            Some(entry) if entry.is_expired() => {
                entries.remove(key);
                None
            }
            Some(entry) => Some(entry.value.clone()),
            None => None,
        }
    }

    /// Presence check with the same expiry side effect as [`TtlCache::get`].
    pub fn has(&self, key: &str) -> bool {
        let mut entries = self.entries.write().unwrap();
        match entries.get(key) {
            Some(entry) if entry.is_expired() => {
                entries.remove(key);
                false
            }
            Some(_) => true,
            None => false,
        }
    }
}

impl<T: Send + Sync + 'static> TtlCache<T> {
    /// Spawn a repeating task that sweeps expired entries every `every`.
    ///
    /// The returned handle owns the task: call [`SweeperHandle::stop`] on
    /// shutdown, or let `Drop` abort it.
    pub fn spawn_sweeper(&self, every: Duration) -> SweeperHandle {
        let cache = self.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            // The first tick fires immediately; skip it so sweeps start
            // one full interval after startup.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let evicted = cache.sweep();
                if evicted > 0 {
                    tracing::debug!(evicted, "cache sweep removed expired entries");
                }
            }
        });
        SweeperHandle { handle }
    }
}

/// Handle for the periodic sweep task.
pub struct SweeperHandle {
    handle: JoinHandle<()>,
}

impl SweeperHandle {
    /// Stop the sweep task.
    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get_returns_value() {
        let cache: TtlCache<u32> = TtlCache::new();
        cache.set("k", 42);
        assert_eq!(cache.get("k"), Some(42));
    }

    #[test]
    fn test_overwrite_replaces_value() {
        let cache: TtlCache<&str> = TtlCache::new();
        cache.set("k", "first");
        cache.set("k", "second");
        assert_eq!(cache.get("k"), Some("second"));
    }

    #[test]
    fn test_expired_entry_is_removed_on_get() {
        let cache: TtlCache<u32> = TtlCache::new();
        cache.set_with_ttl("k", 1, Duration::from_millis(0));
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(cache.get("k"), None);
        // The expired read deleted the entry outright.
        assert_eq!(cache.stats().size, 0);
    }

    #[test]
    fn test_has_shares_expiry_side_effect() {
        let cache: TtlCache<u32> = TtlCache::new();
        cache.set_with_ttl("k", 1, Duration::from_millis(0));
        std::thread::sleep(Duration::from_millis(5));
        assert!(!cache.has("k"));
        assert!(!cache.entries.read().unwrap().contains_key("k"));
    }
}

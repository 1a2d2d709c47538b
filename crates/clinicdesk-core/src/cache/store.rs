use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{de::DeserializeOwned, de::IgnoredAny, Deserialize, Serialize};
use tracing::{debug, warn};

use super::clock::{Clock, SystemClock};
use super::storage::{CacheStorage, MemoryStorage, StorageError};

/// Key prefix shared by every store unless overridden.
pub const DEFAULT_PREFIX: &str = "clinicdesk";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry<T> {
    pub value: T,
    pub stored_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    pub fn new(value: T, stored_at: DateTime<Utc>) -> Self {
        Self { value, stored_at }
    }

    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.stored_at
    }

    /// Present iff `now - stored_at < ttl`.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.age(now) >= ttl
    }

    /// Age in the largest whole unit that fits: `40s ago`, `12m ago`,
    /// `3h ago`, `2d ago`. Under ten seconds, or in the future, reads
    /// `just now`.
    pub fn age_display(&self, now: DateTime<Utc>) -> String {
        const UNITS: [(i64, &str); 4] = [(86_400, "d"), (3_600, "h"), (60, "m"), (1, "s")];
        let seconds = self.age(now).num_seconds();
        if seconds < 10 {
            return "just now".to_string();
        }
        UNITS
            .iter()
            .find(|(size, _)| seconds >= *size)
            .map(|(size, unit)| format!("{}{} ago", seconds / size, unit))
            .unwrap_or_else(|| "just now".to_string())
    }
}

/// TTL cache over an injected storage and clock.
///
/// Keys are namespaced as `{prefix}:{key}`; callers pass keys such as
/// `patients:list`, whose first segment is the entity namespace.
///
/// The store never reports errors. The first storage failure switches the
/// instance into a degraded mode where every read misses and every write is
/// dropped.
pub struct CacheStore {
    storage: Arc<dyn CacheStorage>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    prefix: String,
    degraded: AtomicBool,
}

impl CacheStore {
    pub fn new(storage: Arc<dyn CacheStorage>, clock: Arc<dyn Clock>, ttl: std::time::Duration) -> Self {
        let ttl = Duration::from_std(ttl).unwrap_or(Duration::MAX);
        Self {
            storage,
            clock,
            ttl,
            prefix: DEFAULT_PREFIX.to_string(),
            degraded: AtomicBool::new(false),
        }
    }

    /// A store over fresh `MemoryStorage` and the system clock.
    pub fn in_memory(ttl: std::time::Duration) -> Self {
        Self::new(Arc::new(MemoryStorage::new()), Arc::new(SystemClock), ttl)
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Relaxed)
    }

    fn storage_key(&self, key: &str) -> String {
        format!("{}:{}", self.prefix, key)
    }

    fn degrade(&self, error: &StorageError) {
        if !self.degraded.swap(true, Ordering::Relaxed) {
            warn!(prefix = %self.prefix, error = %error, "Cache storage unavailable, caching disabled");
        }
    }

    fn load<T: DeserializeOwned>(&self, storage_key: &str) -> Option<CacheEntry<T>> {
        if self.is_degraded() {
            return None;
        }

        let raw = match self.storage.get_item(storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                self.degrade(&e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!(key = storage_key, error = %e, "Discarding unreadable cache entry");
                None
            }
        }
    }

    /// Stored value for `key` if present and unexpired.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let storage_key = self.storage_key(key);
        let entry = self.load::<T>(&storage_key)?;

        if entry.is_expired(self.clock.now(), self.ttl) {
            debug!(key = %storage_key, "Cache entry expired");
            if let Err(e) = self.storage.remove_item(&storage_key) {
                self.degrade(&e);
            }
            return None;
        }

        Some(entry.value)
    }

    /// Age of the entry for `key`, if present and unexpired.
    pub fn age(&self, key: &str) -> Option<Duration> {
        let entry = self.load::<IgnoredAny>(&self.storage_key(key))?;
        let now = self.clock.now();
        (!entry.is_expired(now, self.ttl)).then(|| entry.age(now))
    }

    /// Human-readable age of the entry for `key`, `None` if absent.
    pub fn age_display(&self, key: &str) -> Option<String> {
        let entry = self.load::<IgnoredAny>(&self.storage_key(key))?;
        let now = self.clock.now();
        (!entry.is_expired(now, self.ttl)).then(|| entry.age_display(now))
    }

    /// Store `value` under `key` stamped with the current time.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        if self.is_degraded() {
            return;
        }

        let storage_key = self.storage_key(key);
        let entry = CacheEntry::new(value, self.clock.now());
        let raw = match serde_json::to_string(&entry) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = %storage_key, error = %e, "Failed to serialize cache entry");
                return;
            }
        };

        if let Err(e) = self.storage.set_item(&storage_key, &raw) {
            self.degrade(&e);
        }
    }

    /// Remove every entry in `scope` (a namespace or a single key), or every
    /// entry this store manages when `scope` is `None`.
    pub fn clear(&self, scope: Option<&str>) {
        if self.is_degraded() {
            return;
        }

        let root = match scope {
            Some(scope) => self.storage_key(scope),
            None => self.prefix.clone(),
        };
        let nested = format!("{}:", root);

        let keys = match self.storage.keys() {
            Ok(keys) => keys,
            Err(e) => {
                self.degrade(&e);
                return;
            }
        };

        let mut removed = 0usize;
        for key in keys.iter().filter(|k| **k == root || k.starts_with(&nested)) {
            if let Err(e) = self.storage.remove_item(key) {
                self.degrade(&e);
                return;
            }
            removed += 1;
        }

        debug!(scope = %root, removed, "Cleared cache entries");
    }
}

// ============================================================================
// Tests
// ============================================================================

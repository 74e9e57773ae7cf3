//! Single-slot, time-bounded cache of the last successful issue search.
//!
//! There is exactly one query shape, so the entry lives under one fixed key
//! and every successful fetch overwrites it. Stale entries are never evicted;
//! they stay readable through [`IssueCache::read_stale`] for the rate-limit
//! fallback.

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{KeyValueStore, StorageError};
use crate::domain::StatusIssue;

pub const CACHE_KEY: &str = "github_status_cache";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedIssues {
    /// Capture time in milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub data: Vec<StatusIssue>,
}

pub struct IssueCache {
    store: Arc<dyn KeyValueStore>,
    ttl: Duration,
}

impl IssueCache {
    pub fn new(store: Arc<dyn KeyValueStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub fn read(&self) -> Option<Vec<StatusIssue>> {
        self.read_at(Utc::now().timestamp_millis())
    }

    /// Returns the cached issues if the entry is younger than the TTL.
    pub fn read_at(&self, now_ms: i64) -> Option<Vec<StatusIssue>> {
        let entry = self.load()?;
        let ttl_ms = i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX);
        // An age that does not fit in i64 is treated as expired.
        match now_ms.checked_sub(entry.timestamp) {
            Some(age_ms) if age_ms < ttl_ms => {
                tracing::debug!(
                    target: "cache",
                    expires_in_ms = ttl_ms.saturating_sub(age_ms),
                    "using cached status issues"
                );
                Some(entry.data)
            }
            age_ms => {
                tracing::debug!(target: "cache", ?age_ms, "cache expired");
                None
            }
        }
    }

    /// Returns the stored entry regardless of its age.
    pub fn read_stale(&self) -> Option<CachedIssues> {
        self.load()
    }

    pub fn write(&self, issues: &[StatusIssue]) {
        self.write_at(issues, Utc::now().timestamp_millis());
    }

    /// Best effort: a failed write is logged and otherwise ignored.
    pub fn write_at(&self, issues: &[StatusIssue], now_ms: i64) {
        let entry = CachedIssues {
            timestamp: now_ms,
            data: issues.to_vec(),
        };
        let result = serde_json::to_string(&entry)
            .map_err(StorageError::from)
            .and_then(|encoded| self.store.set(CACHE_KEY, &encoded));
        match result {
            Ok(()) => tracing::debug!(
                target: "cache",
                count = issues.len(),
                ttl_secs = self.ttl.as_secs(),
                "status issues cached"
            ),
            Err(err) => tracing::warn!(target: "cache", error = %err, "failed to cache status issues"),
        }
    }

    fn load(&self) -> Option<CachedIssues> {
        let raw = match self.store.get(CACHE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(target: "cache", error = %err, "failed to read status cache");
                self.evict();
                return None;
            }
        };

        match serde_json::from_str::<CachedIssues>(&raw) {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(target: "cache", error = %err, "discarding corrupt status cache");
                self.evict();
                None
            }
        }
    }

    fn evict(&self) {
        if let Err(err) = self.store.remove(CACHE_KEY) {
            tracing::warn!(target: "cache", error = %err, "failed to evict status cache");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        storage::MemoryStore,
        testing::{sample_issue, FailingStore},
    };

    const TTL: Duration = Duration::from_millis(60_000);
    const T0: i64 = 1_769_095_800_000;

    fn cache() -> (Arc<MemoryStore>, IssueCache) {
        let store = Arc::new(MemoryStore::new());
        let cache = IssueCache::new(store.clone(), TTL);
        (store, cache)
    }

    #[test]
    fn fresh_entry_round_trips() {
        let (_, cache) = cache();
        let issues = vec![sample_issue(1, &["status"]), sample_issue(2, &["maintenance"])];
        cache.write_at(&issues, T0);

        assert_eq!(cache.read_at(T0 + 59_999), Some(issues));
    }

    #[test]
    fn expired_entry_is_absent_but_kept_for_fallback() {
        let (store, cache) = cache();
        let issues = vec![sample_issue(1, &["status"])];
        cache.write_at(&issues, T0);

        assert_eq!(cache.read_at(T0 + 60_000), None);
        assert!(store.get(CACHE_KEY).unwrap().is_some());

        let stale = cache.read_stale().unwrap();
        assert_eq!(stale.timestamp, T0);
        assert_eq!(stale.data, issues);
    }

    #[test]
    fn corrupt_entry_is_evicted() {
        let (store, cache) = cache();
        store.set(CACHE_KEY, "{not json").unwrap();

        assert_eq!(cache.read_at(T0), None);
        assert_eq!(store.get(CACHE_KEY).unwrap(), None);
        assert_eq!(cache.read_at(T0), None);
        assert!(cache.read_stale().is_none());
    }

    #[test]
    fn extreme_timestamp_reads_as_expired() {
        let (store, cache) = cache();
        store
            .set(CACHE_KEY, r#"{"timestamp":-9223372036854775808,"data":[]}"#)
            .unwrap();

        assert_eq!(cache.read(), None);
        assert_eq!(cache.read_at(i64::MAX), None);
        assert_eq!(cache.read_stale().map(|e| e.timestamp), Some(i64::MIN));
    }

    #[test]
    fn future_timestamp_near_limit_does_not_overflow() {
        let (store, cache) = cache();
        store
            .set(CACHE_KEY, r#"{"timestamp":9223372036854775807,"data":[]}"#)
            .unwrap();

        assert_eq!(cache.read_at(0), Some(Vec::new()));
    }

    #[test]
    fn unreadable_storage_evicts_entry() {
        let store = Arc::new(UnreadableStore::default());
        store.inner.set(CACHE_KEY, "{}").unwrap();
        let cache = IssueCache::new(store.clone(), TTL);

        assert_eq!(cache.read_at(T0), None);
        assert_eq!(store.inner.get(CACHE_KEY).unwrap(), None);
    }

    /// Reads fail while writes and removals reach the inner store.
    #[derive(Default)]
    struct UnreadableStore {
        inner: MemoryStore,
    }

    impl KeyValueStore for UnreadableStore {
        fn get(&self, _key: &str) -> crate::storage::Result<Option<String>> {
            Err(std::io::Error::other("read refused").into())
        }

        fn set(&self, key: &str, value: &str) -> crate::storage::Result<()> {
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> crate::storage::Result<()> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn entry_uses_timestamp_and_data_fields() {
        let (store, cache) = cache();
        cache.write_at(&[], T0);
        let raw: serde_json::Value =
            serde_json::from_str(&store.get(CACHE_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(raw["timestamp"], serde_json::json!(T0));
        assert_eq!(raw["data"], serde_json::json!([]));
    }

    #[test]
    fn write_failure_is_swallowed() {
        let cache = IssueCache::new(Arc::new(FailingStore), TTL);
        cache.write_at(&[sample_issue(1, &[])], T0);
        assert_eq!(cache.read_at(T0), None);
    }
}

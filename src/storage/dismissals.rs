use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use super::{KeyValueStore, StorageError};

pub const DISMISSED_KEY: &str = "dismissedAlerts";

/// Ids of alerts acknowledged during the current session.
///
/// The set is re-read from storage on every query, so writes made through
/// another handle on the same storage are visible immediately.
pub struct DismissalStore {
    store: Arc<dyn KeyValueStore>,
    last_dismissed: AtomicBool,
}

impl DismissalStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            last_dismissed: AtomicBool::new(false),
        }
    }

    pub fn dismiss(&self, issue_id: u64) {
        let mut dismissed = self.load();
        if !dismissed.contains(&issue_id) {
            dismissed.push(issue_id);
            let result = serde_json::to_string(&dismissed)
                .map_err(StorageError::from)
                .and_then(|encoded| self.store.set(DISMISSED_KEY, &encoded));
            if let Err(err) = result {
                tracing::warn!(target: "alerts", error = %err, issue_id, "failed to store dismissal");
            }
        }
        self.last_dismissed.store(true, Ordering::Relaxed);
    }

    pub fn is_dismissed(&self, issue_id: u64) -> bool {
        self.load().contains(&issue_id)
    }

    /// Whether `dismiss` has been called through this handle.
    pub fn has_dismissed(&self) -> bool {
        self.last_dismissed.load(Ordering::Relaxed)
    }

    fn load(&self) -> Vec<u64> {
        match self.store.get(DISMISSED_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                tracing::warn!(target: "alerts", error = %err, "ignoring corrupt dismissal set");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!(target: "alerts", error = %err, "failed to read dismissal set");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{storage::MemoryStore, testing::FailingStore};

    #[test]
    fn dismiss_is_idempotent() {
        let store = Arc::new(MemoryStore::new());
        let dismissals = DismissalStore::new(store.clone());
        assert!(!dismissals.has_dismissed());

        dismissals.dismiss(7);
        let once = store.get(DISMISSED_KEY).unwrap();
        dismissals.dismiss(7);
        let twice = store.get(DISMISSED_KEY).unwrap();

        assert_eq!(once.as_deref(), Some("[7]"));
        assert_eq!(once, twice);
        assert!(dismissals.is_dismissed(7));
        assert!(!dismissals.is_dismissed(8));
        assert!(dismissals.has_dismissed());
    }

    #[test]
    fn reads_through_to_shared_storage() {
        let store = Arc::new(MemoryStore::new());
        let first = DismissalStore::new(store.clone());
        let second = DismissalStore::new(store);

        first.dismiss(1);
        second.dismiss(2);
        assert!(first.is_dismissed(2));
        assert!(second.is_dismissed(1));
        assert!(first.has_dismissed() && second.has_dismissed());
    }

    #[test]
    fn corrupt_set_reads_empty_and_is_replaced() {
        let store = Arc::new(MemoryStore::new());
        store.set(DISMISSED_KEY, "oops").unwrap();
        let dismissals = DismissalStore::new(store.clone());

        assert!(!dismissals.is_dismissed(3));
        dismissals.dismiss(3);
        assert_eq!(store.get(DISMISSED_KEY).unwrap().as_deref(), Some("[3]"));
    }

    #[test]
    fn storage_failure_is_not_fatal() {
        let dismissals = DismissalStore::new(Arc::new(FailingStore));
        dismissals.dismiss(5);
        assert!(!dismissals.is_dismissed(5));
        assert!(dismissals.has_dismissed());
    }
}

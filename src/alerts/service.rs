//! The fetch/cache/publish pipeline behind the status banner.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::{
    domain::StatusIssue,
    github::{IssueSource, SourceError},
    storage::{DismissalStore, IssueCache},
};

/// Published state, as last written by [`StatusAlertService::fetch`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertSnapshot {
    pub issues: Vec<StatusIssue>,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Served from a fresh cache entry; no request was made.
    CacheHit(usize),
    Fetched(usize),
    /// Rate limited; an expired cache entry was published instead.
    StaleFallback(usize),
    /// The error is recorded in the snapshot and prior issues are kept.
    Failed,
    /// Another fetch was already in flight.
    Skipped,
}

pub struct StatusAlertService<S> {
    source: S,
    cache: IssueCache,
    dismissals: DismissalStore,
    state: Mutex<AlertSnapshot>,
    in_flight: AtomicBool,
}

impl<S: IssueSource> StatusAlertService<S> {
    pub fn new(source: S, cache: IssueCache, dismissals: DismissalStore) -> Self {
        Self {
            source,
            cache,
            dismissals,
            state: Mutex::new(AlertSnapshot::default()),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Refreshes the published issues. Never fails; errors land in
    /// [`AlertSnapshot::error`].
    ///
    /// At most one request is in flight per service. A call that would start a
    /// second one returns [`FetchOutcome::Skipped`] without touching state.
    pub async fn fetch(&self, force_refresh: bool) -> FetchOutcome {
        if !force_refresh {
            if let Some(cached) = self.cache.read() {
                let count = cached.len();
                self.state.lock().issues = cached;
                return FetchOutcome::CacheHit(count);
            }
        }

        let Some(_guard) = FetchGuard::begin(&self.in_flight, &self.state) else {
            tracing::debug!(target: "alerts", "status fetch already in flight; skipping");
            return FetchOutcome::Skipped;
        };

        self.fetch_remote().await
    }

    pub async fn refresh(&self) -> FetchOutcome {
        self.fetch(true).await
    }

    async fn fetch_remote(&self) -> FetchOutcome {
        let err = match self.source.search_status_issues().await {
            Ok(issues) => {
                let count = issues.len();
                self.cache.write(&issues);
                self.state.lock().issues = issues;
                tracing::info!(target: "alerts", count, "status issues refreshed");
                return FetchOutcome::Fetched(count);
            }
            Err(SourceError::RateLimited) => match self.cache.read_stale() {
                Some(stale) => {
                    let count = stale.data.len();
                    tracing::warn!(
                        target: "alerts",
                        cached_at = stale.timestamp,
                        "rate limited, using stale cache"
                    );
                    self.state.lock().issues = stale.data;
                    return FetchOutcome::StaleFallback(count);
                }
                None => SourceError::RateLimited,
            },
            Err(err) => err,
        };

        tracing::error!(target: "alerts", error = %err, "failed to fetch status issues");
        self.state.lock().error = Some(err.to_string());
        FetchOutcome::Failed
    }

    pub fn snapshot(&self) -> AlertSnapshot {
        self.state.lock().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().is_loading
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    pub fn dismiss(&self, issue_id: u64) {
        self.dismissals.dismiss(issue_id);
    }

    pub fn is_dismissed(&self, issue_id: u64) -> bool {
        self.dismissals.is_dismissed(issue_id)
    }

    pub fn has_dismissed(&self) -> bool {
        self.dismissals.has_dismissed()
    }

    /// First published issue that has not been dismissed.
    pub fn first_active_issue(&self) -> Option<StatusIssue> {
        let issues = self.state.lock().issues.clone();
        issues
            .into_iter()
            .find(|issue| !self.dismissals.is_dismissed(issue.id))
    }

    /// Every non-dismissed issue, in published order.
    pub fn all_active_issues(&self) -> Vec<StatusIssue> {
        let issues = self.state.lock().issues.clone();
        issues
            .into_iter()
            .filter(|issue| !self.dismissals.is_dismissed(issue.id))
            .collect()
    }
}

/// Marks a fetch as in flight. Dropping it clears the loading flag, so every
/// path out of a network fetch resets it exactly once.
struct FetchGuard<'a> {
    in_flight: &'a AtomicBool,
    state: &'a Mutex<AlertSnapshot>,
}

impl<'a> FetchGuard<'a> {
    fn begin(in_flight: &'a AtomicBool, state: &'a Mutex<AlertSnapshot>) -> Option<Self> {
        in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        {
            let mut state = state.lock();
            state.is_loading = true;
            state.error = None;
        }
        Some(Self { in_flight, state })
    }
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        self.state.lock().is_loading = false;
        self.in_flight.store(false, Ordering::Release);
    }
}

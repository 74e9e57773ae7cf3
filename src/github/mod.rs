pub mod client;
pub mod search;

use futures::future::BoxFuture;
use thiserror::Error;

use crate::domain::StatusIssue;

pub use client::GitHubIssueSource;

/// Failure of a single status-issue query.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("GitHub API error: 403")]
    RateLimited,
    #[error("GitHub API error: {0}")]
    Status(u16),
    #[error("failed to reach GitHub API: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid GitHub search response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// The remote query that feeds the alert service. One call is one request.
pub trait IssueSource: Send + Sync {
    fn search_status_issues(&self) -> BoxFuture<'_, Result<Vec<StatusIssue>, SourceError>>;
}

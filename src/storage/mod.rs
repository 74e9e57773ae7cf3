//! String key-value storage and the two stores built on it.

use std::io;

use thiserror::Error;

pub mod cache;
pub mod dismissals;
pub mod file;
pub mod memory;

pub use cache::{CachedIssues, IssueCache, CACHE_KEY};
pub use dismissals::{DismissalStore, DISMISSED_KEY};
pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Synchronous string storage addressed by fixed keys.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

//! Named cache stores keyed by request URL.
//!
//! The store is a capability provided by the hosting environment; the worker
//! only ever talks through [`CacheStorage`]. Stores are created implicitly
//! on first write and destroyed explicitly (activation cleanup or a
//! purge-all message). Concurrent writes to the same key race and the last
//! write wins; no higher-level consistency is expected.
//!
//! Two implementations ship with the crate:
//! - [`FsStorage`] — durable across process restarts, for real hosts.
//! - [`MemoryStorage`] — ephemeral, for tests and in-process hosts.

pub mod fs;
pub mod memory;

pub use fs::FsStorage;
pub use memory::MemoryStorage;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::http::HttpResponse;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt cache entry: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// One cached response plus the moment it was written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedEntry {
    pub response: HttpResponse,
    pub stored_at: DateTime<Utc>,
}

impl CachedEntry {
    pub fn new(response: HttpResponse) -> Self {
        Self {
            response,
            stored_at: Utc::now(),
        }
    }
}

/// Named, persistent key-value store of cached responses.
#[async_trait]
pub trait CacheStorage: Send + Sync {
    /// Write an entry, creating the store if needed. Overwrites any existing
    /// entry for the key.
    async fn put(&self, store: &str, key: &str, entry: CachedEntry) -> Result<(), StoreError>;

    /// Look a key up in one store.
    async fn lookup(&self, store: &str, key: &str) -> Result<Option<CachedEntry>, StoreError>;

    /// Keys currently present in one store. A store that does not exist has
    /// no keys.
    async fn list_keys(&self, store: &str) -> Result<Vec<String>, StoreError>;

    /// Delete a store and every entry in it. Deleting a store that does not
    /// exist is not an error.
    async fn delete_store(&self, store: &str) -> Result<(), StoreError>;

    /// Names of every existing store.
    async fn list_stores(&self) -> Result<Vec<String>, StoreError>;

    /// Look a key up across every store, first hit wins. A read failure in
    /// one store only skips that store; a corrupt entry must not mask a
    /// valid copy elsewhere.
    async fn lookup_any(&self, key: &str) -> Result<Option<CachedEntry>, StoreError> {
        for store in self.list_stores().await? {
            match self.lookup(&store, key).await {
                Ok(Some(entry)) => return Ok(Some(entry)),
                Ok(None) => {}
                Err(e) => debug!(store = %store, error = %e, "store read failed, skipping"),
            }
        }
        Ok(None)
    }
}

//! In-memory cache storage for tests and in-process hosts.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CacheStorage, CachedEntry, StoreError};

#[derive(Default)]
pub struct MemoryStorage {
    stores: Mutex<HashMap<String, HashMap<String, CachedEntry>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStorage for MemoryStorage {
    async fn put(&self, store: &str, key: &str, entry: CachedEntry) -> Result<(), StoreError> {
        let mut stores = self.stores.lock().unwrap();
        stores
            .entry(store.to_string())
            .or_default()
            .insert(key.to_string(), entry);
        Ok(())
    }

    async fn lookup(&self, store: &str, key: &str) -> Result<Option<CachedEntry>, StoreError> {
        let stores = self.stores.lock().unwrap();
        Ok(stores.get(store).and_then(|entries| entries.get(key)).cloned())
    }

    async fn list_keys(&self, store: &str) -> Result<Vec<String>, StoreError> {
        let stores = self.stores.lock().unwrap();
        Ok(stores
            .get(store)
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn delete_store(&self, store: &str) -> Result<(), StoreError> {
        let mut stores = self.stores.lock().unwrap();
        stores.remove(store);
        Ok(())
    }

    async fn list_stores(&self) -> Result<Vec<String>, StoreError> {
        let stores = self.stores.lock().unwrap();
        Ok(stores.keys().cloned().collect())
    }
}

//! Filesystem-backed cache storage.
//!
//! Layout: one directory per store under the cache root, one JSON file per
//! entry named by the SHA-256 of its key. The key itself is kept inside the
//! file so stores can be listed back out. Entries survive process restarts.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use super::{CacheStorage, CachedEntry, StoreError};

#[derive(Debug, Serialize, Deserialize)]
struct Record {
    key: String,
    entry: CachedEntry,
}

pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    pub fn new(root: PathBuf) -> Result<Self, StoreError> {
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn store_dir(&self, store: &str) -> PathBuf {
        self.root.join(store)
    }

    fn entry_path(&self, store: &str, key: &str) -> PathBuf {
        let digest = Sha256::digest(key.as_bytes());
        self.store_dir(store)
            .join(format!("{}.json", hex::encode(digest)))
    }
}

#[async_trait]
impl CacheStorage for FsStorage {
    async fn put(&self, store: &str, key: &str, entry: CachedEntry) -> Result<(), StoreError> {
        std::fs::create_dir_all(self.store_dir(store))?;
        let record = Record {
            key: key.to_string(),
            entry,
        };
        let contents = serde_json::to_string(&record)?;
        std::fs::write(self.entry_path(store, key), contents)?;
        debug!(store = store, key = key, "stored entry");
        Ok(())
    }

    async fn lookup(&self, store: &str, key: &str) -> Result<Option<CachedEntry>, StoreError> {
        let path = self.entry_path(store, key);
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)?;
        let record: Record = serde_json::from_str(&contents)?;
        Ok(Some(record.entry))
    }

    async fn list_keys(&self, store: &str) -> Result<Vec<String>, StoreError> {
        let dir = self.store_dir(store);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut keys = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                let contents = std::fs::read_to_string(&path)?;
                let record: Record = serde_json::from_str(&contents)?;
                keys.push(record.key);
            }
        }
        Ok(keys)
    }

    async fn delete_store(&self, store: &str) -> Result<(), StoreError> {
        let dir = self.store_dir(store);
        if dir.exists() {
            std::fs::remove_dir_all(&dir)?;
            debug!(store = store, "deleted store");
        }
        Ok(())
    }

    async fn list_stores(&self) -> Result<Vec<String>, StoreError> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpResponse;

    fn response(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: vec![("content-type".to_string(), "text/plain".to_string())],
            body: body.as_bytes().to_vec(),
        }
    }

    #[tokio::test]
    async fn test_put_then_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsStorage::new(dir.path().to_path_buf()).unwrap();

        storage
            .put("static-v1", "https://a.example/x.css", CachedEntry::new(response("x")))
            .await
            .unwrap();

        let hit = storage
            .lookup("static-v1", "https://a.example/x.css")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(hit.response.body, b"x");

        let miss = storage
            .lookup("static-v1", "https://a.example/y.css")
            .await
            .unwrap();
        assert!(miss.is_none());
    }

    #[tokio::test]
    async fn test_overwrite_is_last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsStorage::new(dir.path().to_path_buf()).unwrap();

        let key = "https://a.example/data.json";
        storage
            .put("dynamic-v1", key, CachedEntry::new(response("old")))
            .await
            .unwrap();
        storage
            .put("dynamic-v1", key, CachedEntry::new(response("new")))
            .await
            .unwrap();

        let hit = storage.lookup("dynamic-v1", key).await.unwrap().unwrap();
        assert_eq!(hit.response.body, b"new");
        assert_eq!(storage.list_keys("dynamic-v1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_and_delete_stores() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsStorage::new(dir.path().to_path_buf()).unwrap();

        storage
            .put("static-v1", "k1", CachedEntry::new(response("a")))
            .await
            .unwrap();
        storage
            .put("dynamic-v1", "k2", CachedEntry::new(response("b")))
            .await
            .unwrap();

        let mut names = storage.list_stores().await.unwrap();
        names.sort();
        assert_eq!(names, vec!["dynamic-v1", "static-v1"]);

        storage.delete_store("static-v1").await.unwrap();
        assert_eq!(storage.list_stores().await.unwrap(), vec!["dynamic-v1"]);

        // Deleting a missing store is fine.
        storage.delete_store("static-v1").await.unwrap();
    }

    #[tokio::test]
    async fn test_lookup_any_scans_all_stores() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsStorage::new(dir.path().to_path_buf()).unwrap();

        storage
            .put("dynamic-v1", "k", CachedEntry::new(response("hit")))
            .await
            .unwrap();

        let hit = storage.lookup_any("k").await.unwrap().unwrap();
        assert_eq!(hit.response.body, b"hit");
        assert!(storage.lookup_any("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_entries_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let storage = FsStorage::new(dir.path().to_path_buf()).unwrap();
            storage
                .put("static-v1", "k", CachedEntry::new(response("durable")))
                .await
                .unwrap();
        }
        let reopened = FsStorage::new(dir.path().to_path_buf()).unwrap();
        let hit = reopened.lookup("static-v1", "k").await.unwrap().unwrap();
        assert_eq!(hit.response.body, b"durable");
    }
}

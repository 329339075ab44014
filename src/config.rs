//! Worker configuration.
//!
//! The build version, application origin, and precache manifest are fixed at
//! deploy time. Hosts either construct a [`WorkerConfig`] directly or load
//! the JSON written next to the application
//! (`~/.config/spendcache/worker.json`).

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use url::Url;

/// Application name used for config/cache directory paths
const APP_NAME: &str = "spendcache";

/// Config file name
const CONFIG_FILE: &str = "worker.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Build version embedded at deploy time; tags both cache stores.
    pub version: String,
    /// Application origin. Cross-origin requests are never intercepted.
    pub origin: Url,
    /// URLs (absolute, or relative to the origin) precached into the static
    /// store at install time. Immutable for the lifetime of one version.
    pub precache: Vec<String>,
}

impl WorkerConfig {
    pub fn new(version: impl Into<String>, origin: Url) -> Self {
        Self {
            version: version.into(),
            origin,
            precache: Vec::new(),
        }
    }

    pub fn with_precache(mut self, manifest: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.precache = manifest.into_iter().map(Into::into).collect();
        self
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Default root for the filesystem store.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("worker.json");

        let config = WorkerConfig::new("3", Url::parse("https://app.example.com").unwrap())
            .with_precache(["/index.html", "/app.css?v=3"]);
        config.save_to(&path).unwrap();

        let loaded = WorkerConfig::load_from(&path).unwrap();
        assert_eq!(loaded.version, "3");
        assert_eq!(loaded.origin.as_str(), "https://app.example.com/");
        assert_eq!(loaded.precache, vec!["/index.html", "/app.css?v=3"]);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(WorkerConfig::load_from(&dir.path().join("absent.json")).is_err());
    }
}

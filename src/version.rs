//! Cache store names for one build version.

/// The two store names meaningful to the worker: a static precache tier and
/// a dynamic runtime tier, each tagged with the build version embedded at
/// deploy time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheNames {
    static_name: String,
    dynamic_name: String,
}

impl CacheNames {
    pub fn for_version(version: &str) -> Self {
        Self {
            static_name: format!("static-v{version}"),
            dynamic_name: format!("dynamic-v{version}"),
        }
    }

    pub fn static_store(&self) -> &str {
        &self.static_name
    }

    pub fn dynamic_store(&self) -> &str {
        &self.dynamic_name
    }

    /// Any store whose name fails this check at activation time is stale and
    /// gets deleted.
    pub fn is_current(&self, name: &str) -> bool {
        name == self.static_name || name == self.dynamic_name
    }
}

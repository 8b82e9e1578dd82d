//! Process-wide cache of tenant-scoped user type configuration.
//!
//! The cache maps a scope key to a `userType → allowed userSubType list`
//! table. Entries are added lazily on first use and live for the process;
//! nothing removes them. Concurrent readers are supported during steady
//! state and concurrent insertions during the fetch-on-miss path are safe:
//! the map behind the lock is only ever swapped whole entries, so readers
//! never observe a partial value.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// userType → allowed userSubType values for one scope.
pub type UserTypeConfig = HashMap<String, Vec<String>>;

/// Thread-safe scope-keyed configuration cache.
#[derive(Debug, Clone, Default)]
pub struct TaxonomyCache {
    entries: Arc<RwLock<HashMap<String, UserTypeConfig>>>,
}

impl TaxonomyCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the configuration for a scope key.
    pub async fn get(&self, scope: &str) -> Option<UserTypeConfig> {
        self.entries.read().await.get(scope).cloned()
    }

    /// Insert a fetched configuration for a scope key.
    ///
    /// An empty configuration never evicts an existing non-empty entry.
    /// When two fetches for the same key race, either writer may win; both
    /// hold complete maps.
    pub async fn insert(&self, scope: impl Into<String>, config: UserTypeConfig) {
        let scope = scope.into();
        let mut entries = self.entries.write().await;
        match entries.get(&scope) {
            Some(existing) if !existing.is_empty() && config.is_empty() => {}
            _ => {
                entries.insert(scope, config);
            }
        }
    }

    /// Number of cached scopes, used by tests and diagnostics.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache holds no scopes.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

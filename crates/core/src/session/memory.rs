//! Memory Session Store

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;

use super::{SessionStore, SessionStoreError};

/// Session store that lives only as long as the value itself.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<FxHashMap<String, String>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with a single entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = FxHashMap::default();

        entries.insert(key.to_string(), value.to_string());

        Self {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), SessionStoreError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), SessionStoreError> {
        self.entries.write().await.remove(key);

        Ok(())
    }
}

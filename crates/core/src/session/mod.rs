//! Session Storage
//!
//! Key/value persistence scoped to a single browsing session. The auth service
//! is the only writer.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

mod file;
mod memory;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;

/// Session storage errors.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    /// Backing file could not be read or written.
    #[error("session storage IO error")]
    Io(#[from] std::io::Error),

    /// Backing file does not hold a JSON object of strings.
    #[error("session storage is corrupt")]
    Corrupt(#[source] serde_json::Error),
}

/// String key/value storage that lives as long as the session.
#[automock]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), SessionStoreError>;

    /// Remove `key`. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<(), SessionStoreError>;
}

//! File Session Store
//!
//! Keeps session entries in a JSON object on disk.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tokio::{fs, sync::Mutex};
use tracing::warn;

use super::{SessionStore, SessionStoreError};

type Entries = FxHashMap<String, String>;

/// Session store backed by a JSON file, so a session outlives the process.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSessionStore {
    /// Use the file at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> Result<Entries, SessionStoreError> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Entries::default()),
            Err(error) => return Err(error.into()),
        };

        if contents.trim().is_empty() {
            return Ok(Entries::default());
        }

        serde_json::from_str(&contents).map_err(SessionStoreError::Corrupt)
    }

    /// Corrupt contents are discarded; the next write replaces them.
    async fn read_entries_for_write(&self) -> Result<Entries, SessionStoreError> {
        match self.read_entries().await {
            Err(SessionStoreError::Corrupt(error)) => {
                warn!(path = %self.path.display(), %error, "discarding corrupt session file");

                Ok(Entries::default())
            }
            other => other,
        }
    }

    async fn write_entries(&self, entries: &Entries) -> Result<(), SessionStoreError> {
        let contents = serde_json::to_string_pretty(entries).map_err(SessionStoreError::Corrupt)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&self.path, contents).await?;

        Ok(())
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        Ok(self.read_entries().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), SessionStoreError> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.read_entries_for_write().await?;

        entries.insert(key.to_string(), value.to_string());

        self.write_entries(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), SessionStoreError> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.read_entries_for_write().await?;

        entries.remove(key);

        self.write_entries(&entries).await
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn missing_file_reads_as_empty() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileSessionStore::new(dir.path().join("session.json"));

        assert_eq!(store.get("user").await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn values_survive_a_new_store_instance() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("session.json");

        FileSessionStore::new(&path).set("user", "{}").await?;

        let reopened = FileSessionStore::new(&path);

        assert_eq!(reopened.get("user").await?.as_deref(), Some("{}"));

        Ok(())
    }

    #[tokio::test]
    async fn remove_deletes_only_the_given_key() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileSessionStore::new(dir.path().join("session.json"));

        store.set("user", "alex").await?;
        store.set("theme", "dark").await?;
        store.remove("user").await?;

        assert_eq!(store.get("user").await?, None);
        assert_eq!(store.get("theme").await?.as_deref(), Some("dark"));

        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_is_reported_on_read() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.json");

        std::fs::write(&path, "not json")?;

        let store = FileSessionStore::new(&path);

        assert!(matches!(
            store.get("user").await,
            Err(SessionStoreError::Corrupt(_))
        ));

        store.remove("user").await?;

        assert_eq!(store.get("user").await?, None);

        Ok(())
    }
}

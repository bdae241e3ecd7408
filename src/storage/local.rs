//! Local filesystem key-value store.
//!
//! Keeps the whole keyspace in a single JSON file, rewritten atomically on
//! every mutation. Intended for development and single-host deployments;
//! production deployments should use [`RestStore`](crate::storage::RestStore).
//!
//! ## File Layout
//!
//! ```text
//! {
//!   "sydney:events":             { "type": "string", "value": "[...]" },
//!   "sydney:events:lastUpdated": { "type": "string", "value": "1760000000000" },
//!   "sydney:subscriptions:<id>": { "type": "list",   "value": ["{...}"] },
//!   "sydney:all_emails":         { "type": "set",    "value": ["a@b.com"] }
//! }
//! ```

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::error::{AppError, Result};
use crate::storage::KeyValueStore;
use crate::storage::keyspace::Keyspace;

/// File-backed key-value store.
pub struct LocalStore {
    path: PathBuf,
    // serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl LocalStore {
    /// Create a store persisted at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    #[cfg(test)]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        Ok(())
    }

    /// Read the keyspace, empty if the file doesn't exist.
    async fn read_keyspace(&self) -> Result<Keyspace> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Keyspace::default()),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Write the keyspace atomically (write to temp, then rename).
    async fn write_keyspace(&self, keyspace: &Keyspace) -> Result<()> {
        self.ensure_dir().await?;
        let bytes = serde_json::to_vec_pretty(keyspace)?;

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Apply a mutation and persist the result.
    async fn mutate<T>(&self, op: impl FnOnce(&mut Keyspace) -> Result<T>) -> Result<T> {
        let _guard = self.lock.lock().await;
        let mut keyspace = self.read_keyspace().await?;
        let value = op(&mut keyspace)?;
        self.write_keyspace(&keyspace).await?;
        Ok(value)
    }

    /// List items under `key`, head first.
    #[cfg(test)]
    pub async fn list(&self, key: &str) -> Result<Vec<String>> {
        let _guard = self.lock.lock().await;
        self.read_keyspace().await?.list(key)
    }

    /// Set members under `key`.
    #[cfg(test)]
    pub async fn members(&self, key: &str) -> Result<Vec<String>> {
        let _guard = self.lock.lock().await;
        self.read_keyspace().await?.members(key)
    }
}

#[async_trait]
impl KeyValueStore for LocalStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        self.read_keyspace().await?.get(key)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.mutate(|ks| {
            ks.set(key, value);
            Ok(())
        })
        .await
    }

    async fn list_prepend(&self, key: &str, value: &str) -> Result<usize> {
        self.mutate(|ks| ks.list_prepend(key, value)).await
    }

    async fn set_add(&self, key: &str, member: &str) -> Result<bool> {
        self.mutate(|ks| ks.set_add(key, member)).await
    }
}

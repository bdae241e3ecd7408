//! In-memory key-value store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::storage::KeyValueStore;
use crate::storage::keyspace::Keyspace;

/// Process-local store; contents are lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    keyspace: RwLock<Keyspace>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// List items under `key`, head first.
    #[cfg(test)]
    pub async fn list(&self, key: &str) -> Result<Vec<String>> {
        self.keyspace.read().await.list(key)
    }

    /// Set members under `key`.
    #[cfg(test)]
    pub async fn members(&self, key: &str) -> Result<Vec<String>> {
        self.keyspace.read().await.members(key)
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.keyspace.read().await.get(key)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.keyspace.write().await.set(key, value);
        Ok(())
    }

    async fn list_prepend(&self, key: &str, value: &str) -> Result<usize> {
        self.keyspace.write().await.list_prepend(key, value)
    }

    async fn set_add(&self, key: &str, member: &str) -> Result<bool> {
        self.keyspace.write().await.set_add(key, member)
    }
}

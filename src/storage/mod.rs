//! Storage abstractions for the event catalog and subscriptions.
//!
//! The pipeline talks to a plain key-value store through [`KeyValueStore`];
//! [`CatalogStore`] layers the typed catalog/subscription layout on top.
//!
//! ## Key Layout
//!
//! ```text
//! sydney:events                    # string: JSON array of events
//! sydney:events:lastUpdated        # string: integer milliseconds
//! sydney:subscriptions:{eventId}   # list:   JSON subscriptions, newest first
//! sydney:all_emails                # set:    every captured email
//! ```

mod catalog;
pub mod keyspace;
pub mod local;
pub mod memory;
pub mod rest;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Config, StoreBackend};

// Re-export for convenience
pub use catalog::{CatalogStore, StoreRead, decode_events, decode_timestamp};
pub use local::LocalStore;
pub use memory::MemoryStore;
pub use rest::RestStore;

/// Key holding the serialized catalog.
pub const CATALOG_KEY: &str = "sydney:events";

/// Key holding the catalog's last refresh time.
pub const LAST_UPDATED_KEY: &str = "sydney:events:lastUpdated";

/// Set of every subscribed email.
pub const ALL_EMAILS_KEY: &str = "sydney:all_emails";

/// List of subscriptions for one event.
pub fn subscriptions_key(event_id: &str) -> String {
    format!("sydney:subscriptions:{}", event_id)
}

/// Minimal key-value store operations used by the pipeline.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a string value.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a string value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Push onto the head of a list, returning the new length.
    async fn list_prepend(&self, key: &str, value: &str) -> Result<usize>;

    /// Add a member to a set, returning whether it was newly added.
    async fn set_add(&self, key: &str, member: &str) -> Result<bool>;
}

/// Open the backend selected in `config`.
pub fn open_store(config: &Config) -> Result<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match config.store.backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Local => Arc::new(LocalStore::new(&config.store.path)),
        StoreBackend::Rest => Arc::new(RestStore::from_config(&config.store, &config.crawler)?),
    };
    log::debug!("Opened {:?} store", config.store.backend);
    Ok(store)
}

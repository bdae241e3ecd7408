//! Typed catalog and subscription access over a [`KeyValueStore`].
//!
//! All decoding of stored values happens here, once, so callers only ever
//! see a [`Catalog`].

use std::sync::Arc;

use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{Catalog, Event, Subscription};
use crate::storage::{
    ALL_EMAILS_KEY, CATALOG_KEY, KeyValueStore, LAST_UPDATED_KEY, subscriptions_key,
};

/// Result of reading the catalog.
///
/// Reads never fail: when the store or the stored data is unusable the
/// catalog is empty and `error` says why.
#[derive(Debug)]
pub struct StoreRead {
    pub catalog: Catalog,
    pub error: Option<AppError>,
}

/// Catalog and subscription persistence.
#[derive(Clone)]
pub struct CatalogStore {
    kv: Arc<dyn KeyValueStore>,
}

impl CatalogStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Read the stored catalog, treating any failure as "no data".
    pub async fn load(&self) -> StoreRead {
        match self.try_load().await {
            Ok(catalog) => StoreRead {
                catalog,
                error: None,
            },
            Err(error) => {
                log::warn!("Reading cached events failed, treating as empty: {}", error);
                StoreRead {
                    catalog: Catalog::default(),
                    error: Some(error),
                }
            }
        }
    }

    async fn try_load(&self) -> Result<Catalog> {
        let raw_events = self.kv.get(CATALOG_KEY).await?;
        let raw_updated = self.kv.get(LAST_UPDATED_KEY).await?;

        let events = match raw_events {
            Some(raw) => decode_events(&raw)?,
            None => Vec::new(),
        };
        // an unreadable timestamp only makes the catalog stale
        let last_updated = match raw_updated {
            Some(raw) => decode_timestamp(&raw).unwrap_or_else(|e| {
                log::warn!("{}; treating catalog as stale", e);
                0
            }),
            None => 0,
        };

        Ok(Catalog::new(events, last_updated))
    }

    /// Replace the stored catalog and its timestamp.
    pub async fn save(&self, catalog: &Catalog) -> Result<()> {
        let json = serde_json::to_string(&catalog.events)?;
        self.kv.set(CATALOG_KEY, &json).await?;
        self.kv
            .set(LAST_UPDATED_KEY, &catalog.last_updated.to_string())
            .await?;
        log::debug!(
            "Stored {} events (last updated {})",
            catalog.events.len(),
            catalog.last_updated
        );
        Ok(())
    }

    /// Record a subscription in the per-event list and the global email set.
    pub async fn append_subscription(&self, subscription: &Subscription) -> Result<()> {
        let json = serde_json::to_string(subscription)?;
        self.kv
            .list_prepend(&subscriptions_key(&subscription.event_id), &json)
            .await?;
        self.kv.set_add(ALL_EMAILS_KEY, &subscription.email).await?;
        Ok(())
    }
}

/// Decode a stored catalog value.
///
/// Accepts a JSON array of events, or a JSON string whose content is that
/// array (values written through clients that encode strings twice).
pub fn decode_events(raw: &str) -> Result<Vec<Event>> {
    let value: Value = serde_json::from_str(raw)?;
    let value = match value {
        Value::String(inner) => serde_json::from_str(&inner)?,
        other => other,
    };
    Ok(serde_json::from_value(value)?)
}

/// Decode a stored timestamp, bare (`123`) or quoted (`"123"`).
pub fn decode_timestamp(raw: &str) -> Result<i64> {
    let trimmed = raw.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    unquoted
        .parse()
        .map_err(|_| AppError::store(format!("invalid timestamp '{}'", raw)))
}

// src/app.rs

//! Application context tying the store, scraper and clock together.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::Result;
use crate::models::{
    CategorySummary, Config, Event, SubscribeRequest, SubscribeResponse, summarize,
};
use crate::pipeline::{self, EventsOutcome, RefreshResponse, ScrapeOutcome};
use crate::services::{self, EventScraper, SourceExtractor, default_sources};
use crate::storage::{CatalogStore, KeyValueStore, open_store};
use crate::utils::clock::{Clock, SystemClock};
use crate::utils::http::{HttpFetcher, PageFetcher};

/// Entry points for reading, refreshing and subscribing to events.
pub struct EventsApp {
    store: CatalogStore,
    scraper: EventScraper,
    clock: Arc<dyn Clock>,
    // held for the duration of every refresh in this process
    refresh_lock: Mutex<()>,
    secret: Option<String>,
}

impl EventsApp {
    pub fn new(
        kv: Arc<dyn KeyValueStore>,
        fetcher: Arc<dyn PageFetcher>,
        sources: Vec<Arc<dyn SourceExtractor>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store: CatalogStore::new(kv),
            scraper: EventScraper::new(fetcher, sources, Arc::clone(&clock)),
            clock,
            refresh_lock: Mutex::new(()),
            secret: None,
        }
    }

    /// Build the application from configuration with the built-in sources.
    pub fn from_config(config: &Config) -> Result<Self> {
        let kv = open_store(config)?;
        let fetcher = HttpFetcher::from_config(&config.crawler)?;
        let app = Self::new(kv, Arc::new(fetcher), default_sources(), Arc::new(SystemClock))
            .with_secret(config.refresh_secret());
        Ok(app)
    }

    /// Set the secret required by [`refresh`](Self::refresh).
    pub fn with_secret(mut self, secret: Option<impl Into<String>>) -> Self {
        self.secret = secret.map(Into::into);
        self
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// The current catalog, refreshed first when missing or stale.
    pub async fn get_events(&self) -> EventsOutcome {
        pipeline::get_events(
            &self.scraper,
            &self.store,
            self.clock.as_ref(),
            &self.refresh_lock,
        )
        .await
    }

    pub async fn get_event_by_id(&self, id: &str) -> Option<Event> {
        let outcome = self.get_events().await;
        pipeline::find_event(&outcome.events, id)
    }

    /// Scrape all sources now, regardless of freshness.
    pub async fn scrape_all_events(&self) -> ScrapeOutcome {
        let _guard = self.refresh_lock.lock().await;
        pipeline::scrape_all_events(&self.scraper, &self.store, self.clock.as_ref()).await
    }

    /// Forced scrape guarded by a `Bearer <secret>` authorization value.
    pub async fn refresh(&self, authorization: Option<&str>) -> Result<RefreshResponse> {
        if let Err(error) = pipeline::authorize(authorization, self.secret.as_deref()) {
            log::warn!("Rejected unauthorized refresh");
            return Err(error);
        }
        let outcome = self.scrape_all_events().await;
        Ok(RefreshResponse::from_outcome(&outcome))
    }

    pub async fn subscribe(&self, request: SubscribeRequest) -> SubscribeResponse {
        services::subscribe(&self.store, self.clock.as_ref(), request).await
    }

    /// Category summaries over the current catalog, largest first.
    pub async fn categories(&self) -> Vec<CategorySummary> {
        summarize(&self.get_events().await.events)
    }

    pub async fn events_in_category(&self, name: &str) -> Vec<Event> {
        pipeline::events_in_category(&self.get_events().await.events, name)
    }
}

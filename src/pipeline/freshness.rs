// src/pipeline/freshness.rs

//! Freshness gate: serve the cached catalog or refresh it.

use tokio::sync::Mutex;

use crate::error::AppError;
use crate::models::{Catalog, Event};
use crate::pipeline::aggregate::{ScrapeOutcome, scrape_all_events};
use crate::services::EventScraper;
use crate::storage::CatalogStore;
use crate::utils::clock::Clock;

/// Cached catalogs older than this (6 hours) are refreshed before serving.
pub const STALENESS_THRESHOLD_MS: i64 = 6 * 60 * 60 * 1000;

/// Whether a stored catalog can be served as-is at `now_ms`.
///
/// The stored timestamp is untrusted: one that lies in the future or is too
/// far away to subtract counts as stale.
pub fn is_usable(catalog: &Catalog, now_ms: i64) -> bool {
    !catalog.is_empty()
        && now_ms
            .checked_sub(catalog.last_updated)
            .is_some_and(|age| (0..=STALENESS_THRESHOLD_MS).contains(&age))
}

/// How the served catalog was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogOrigin {
    /// Read from the store unchanged
    Cached,
    /// Produced by a scrape-all run
    Refreshed,
    /// The refresh itself broke down; built-in events were served
    Fallback,
}

/// Catalog served to readers.
#[derive(Debug)]
pub struct EventsOutcome {
    pub events: Vec<Event>,
    pub last_updated: i64,
    pub origin: CatalogOrigin,
    /// Reading the store failed and was treated as "no data"
    pub read_error: Option<AppError>,
    /// The scrape that produced `events`, unless they were cached.
    /// Its own `events` have been moved out into this outcome.
    pub scrape: Option<ScrapeOutcome>,
}

impl EventsOutcome {
    fn cached(catalog: Catalog) -> Self {
        Self {
            events: catalog.events,
            last_updated: catalog.last_updated,
            origin: CatalogOrigin::Cached,
            read_error: None,
            scrape: None,
        }
    }

    fn refreshed(read_error: Option<AppError>, mut scrape: ScrapeOutcome) -> Self {
        let origin = if scrape.aggregate_error.is_some() {
            CatalogOrigin::Fallback
        } else {
            CatalogOrigin::Refreshed
        };
        Self {
            events: std::mem::take(&mut scrape.events),
            last_updated: scrape.refreshed_at,
            origin,
            read_error,
            scrape: Some(scrape),
        }
    }
}

/// Return the stored catalog when usable, otherwise refresh it.
///
/// Refreshes are serialized on `refresh_lock`. A reader that waited for the
/// lock re-reads the store first, so concurrent stale reads share the
/// catalog written by whichever refresh ran first.
pub async fn get_events(
    scraper: &EventScraper,
    store: &CatalogStore,
    clock: &dyn Clock,
    refresh_lock: &Mutex<()>,
) -> EventsOutcome {
    let read = store.load().await;
    if is_usable(&read.catalog, clock.now_ms()) {
        return EventsOutcome::cached(read.catalog);
    }

    let _guard = refresh_lock.lock().await;

    let reread = store.load().await;
    if is_usable(&reread.catalog, clock.now_ms()) {
        log::debug!("Catalog refreshed while waiting, serving it");
        return EventsOutcome::cached(reread.catalog);
    }

    log::info!(
        "Cached catalog unusable ({} events, last updated {}), refreshing",
        read.catalog.events.len(),
        read.catalog.last_updated
    );
    let scrape = scrape_all_events(scraper, store, clock).await;
    EventsOutcome::refreshed(read.error.or(reread.error), scrape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::models::EventDraft;
    use crate::services::sources::default_sources;
    use crate::storage::MemoryStore;
    use crate::test_support::{FailingStore, FixedClock, fixtures};

    const NOW: i64 = 1_760_000_000_000;

    fn catalog(last_updated: i64) -> Catalog {
        let events = vec![EventDraft::titled("Cached Gig", "https://example.com").into_event(0)];
        Catalog::new(events, last_updated)
    }

    #[test]
    fn test_is_usable_boundaries() {
        assert!(is_usable(&catalog(NOW), NOW));
        assert!(is_usable(&catalog(NOW - STALENESS_THRESHOLD_MS), NOW));
        assert!(!is_usable(&catalog(NOW - STALENESS_THRESHOLD_MS - 1), NOW));
        assert!(!is_usable(&Catalog::new(Vec::new(), NOW), NOW));
        assert_eq!(STALENESS_THRESHOLD_MS, 21_600_000);
    }

    #[test]
    fn test_out_of_range_timestamps_are_stale() {
        assert!(!is_usable(&catalog(i64::MIN), NOW));
        assert!(!is_usable(&catalog(i64::MAX), NOW));
        assert!(!is_usable(&catalog(NOW + 1), NOW));
        assert!(!is_usable(&catalog(0), i64::MIN));
    }

    struct Harness {
        scraper: EventScraper,
        store: CatalogStore,
        clock: Arc<FixedClock>,
        fetcher: Arc<crate::test_support::StubFetcher>,
        lock: Mutex<()>,
    }

    impl Harness {
        fn new() -> Self {
            let clock = Arc::new(FixedClock::new(NOW));
            let fetcher = Arc::new(fixtures::all_sources());
            Self {
                scraper: EventScraper::new(fetcher.clone(), default_sources(), clock.clone()),
                store: CatalogStore::new(Arc::new(MemoryStore::new())),
                clock,
                fetcher,
                lock: Mutex::new(()),
            }
        }

        async fn get(&self) -> EventsOutcome {
            get_events(&self.scraper, &self.store, self.clock.as_ref(), &self.lock).await
        }
    }

    #[tokio::test]
    async fn test_fresh_catalog_is_served_unchanged() {
        let h = Harness::new();
        let stored = catalog(NOW - 1_000);
        h.store.save(&stored).await.unwrap();

        let outcome = h.get().await;

        assert_eq!(outcome.origin, CatalogOrigin::Cached);
        assert_eq!(outcome.events, stored.events);
        assert_eq!(outcome.last_updated, stored.last_updated);
        assert_eq!(h.fetcher.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_stale_catalog_is_refreshed() {
        let h = Harness::new();
        h.store
            .save(&catalog(NOW - STALENESS_THRESHOLD_MS - 1))
            .await
            .unwrap();

        let outcome = h.get().await;

        assert_eq!(outcome.origin, CatalogOrigin::Refreshed);
        assert_eq!(outcome.last_updated, NOW);
        assert_eq!(outcome.events.len(), fixtures::TITLES.len());
        assert_eq!(h.fetcher.fetch_count(), 3);
    }

    #[tokio::test]
    async fn test_empty_store_is_refreshed_then_cached() {
        let h = Harness::new();

        let first = h.get().await;
        assert_eq!(first.origin, CatalogOrigin::Refreshed);

        h.clock.advance(60_000);
        let second = h.get().await;
        assert_eq!(second.origin, CatalogOrigin::Cached);
        assert_eq!(second.events, first.events);
        assert_eq!(h.fetcher.fetch_count(), 3);
    }

    #[tokio::test]
    async fn test_catalog_goes_stale_after_threshold() {
        let h = Harness::new();
        h.get().await;

        h.clock.advance(STALENESS_THRESHOLD_MS + 1);
        let outcome = h.get().await;

        assert_eq!(outcome.origin, CatalogOrigin::Refreshed);
        assert_eq!(h.fetcher.fetch_count(), 6);
    }

    #[tokio::test]
    async fn test_read_failure_triggers_refresh() {
        let clock = Arc::new(FixedClock::new(NOW));
        let scraper =
            EventScraper::new(Arc::new(fixtures::all_sources()), default_sources(), clock.clone());
        let store = CatalogStore::new(Arc::new(FailingStore));
        let lock = Mutex::new(());

        let outcome = get_events(&scraper, &store, clock.as_ref(), &lock).await;

        assert_eq!(outcome.origin, CatalogOrigin::Refreshed);
        assert_eq!(outcome.events.len(), fixtures::TITLES.len());
        assert!(matches!(outcome.read_error, Some(AppError::Store(_))));
        let scrape = outcome.scrape.as_ref().unwrap();
        assert!(scrape.store_error.is_some());
    }
}

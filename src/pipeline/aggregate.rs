// src/pipeline/aggregate.rs

//! Scrape-all pipeline: fan out, combine, fall back, persist.

use crate::error::AppError;
use crate::models::{Catalog, Event};
use crate::services::{EventScraper, SourceReport, sample_events};
use crate::storage::CatalogStore;
use crate::utils::clock::Clock;
use crate::utils::log;

/// Where a scraped catalog came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeOrigin {
    /// At least one source produced events
    Live,
    /// Nothing was extracted; the built-in catalog was used
    Sample,
}

/// Result of one scrape-all run.
#[derive(Debug)]
pub struct ScrapeOutcome {
    pub events: Vec<Event>,
    pub refreshed_at: i64,
    pub origin: ScrapeOrigin,
    pub reports: Vec<SourceReport>,
    /// Persisting the catalog failed; `events` are still valid
    pub store_error: Option<AppError>,
    /// The fan-out itself failed and no per-source reports exist
    pub aggregate_error: Option<AppError>,
}

impl ScrapeOutcome {
    pub fn source_failures(&self) -> usize {
        self.reports.iter().filter(|r| !r.is_ok()).count()
    }
}

/// Scrape every source, substitute the sample catalog when nothing was
/// found, and store the result.
///
/// Never fails; degraded paths are recorded on the outcome.
pub async fn scrape_all_events(
    scraper: &EventScraper,
    store: &CatalogStore,
    clock: &dyn Clock,
) -> ScrapeOutcome {
    log::header("Scraping Sydney events");

    let (reports, aggregate_error) = match scraper.harvest_all().await {
        Ok(reports) => (reports, None),
        Err(error) => {
            ::log::error!("Scraping events failed, using sample events: {}", error);
            (Vec::new(), Some(error))
        }
    };

    let live: Vec<Event> = reports
        .iter()
        .flat_map(|report| report.events.iter().cloned())
        .collect();

    let refreshed_at = clock.now_ms();
    let (events, origin) = if live.is_empty() {
        if aggregate_error.is_none() {
            ::log::warn!("No events scraped from any source, using sample events");
        }
        (sample_events(refreshed_at), ScrapeOrigin::Sample)
    } else {
        (live, ScrapeOrigin::Live)
    };

    let catalog = Catalog::new(events, refreshed_at);
    let store_error = match store.save(&catalog).await {
        Ok(()) => None,
        Err(error) => {
            ::log::warn!("Error storing events: {}", error);
            Some(error)
        }
    };

    let outcome = ScrapeOutcome {
        events: catalog.events,
        refreshed_at,
        origin,
        reports,
        store_error,
        aggregate_error,
    };

    log::summary(
        "Scrape",
        &[
            ("Events", outcome.events.len().to_string()),
            ("Origin", format!("{:?}", outcome.origin)),
            ("Failed sources", outcome.source_failures().to_string()),
            ("Stored", outcome.store_error.is_none().to_string()),
        ],
    );

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::services::sources::default_sources;
    use crate::storage::MemoryStore;
    use crate::test_support::{FailingStore, FixedClock, PanickingSource, StubFetcher, fixtures};

    fn scraper(fetcher: StubFetcher, clock: Arc<FixedClock>) -> EventScraper {
        EventScraper::new(Arc::new(fetcher), default_sources(), clock)
    }

    fn titles(events: &[Event]) -> Vec<&str> {
        events.iter().map(|e| e.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_live_events_in_source_order() {
        let clock = Arc::new(FixedClock::new(500));
        let store = CatalogStore::new(Arc::new(MemoryStore::new()));

        let outcome =
            scrape_all_events(&scraper(fixtures::all_sources(), clock.clone()), &store, clock.as_ref())
                .await;

        assert_eq!(outcome.origin, ScrapeOrigin::Live);
        assert_eq!(titles(&outcome.events), fixtures::TITLES.to_vec());
        assert_eq!(outcome.refreshed_at, 500);
        assert!(outcome.store_error.is_none());
        assert!(outcome.aggregate_error.is_none());
    }

    #[tokio::test]
    async fn test_scrape_then_read_round_trips() {
        let clock = Arc::new(FixedClock::new(500));
        let store = CatalogStore::new(Arc::new(MemoryStore::new()));

        let outcome =
            scrape_all_events(&scraper(fixtures::all_sources(), clock.clone()), &store, clock.as_ref())
                .await;
        let read = store.load().await;

        assert_eq!(read.catalog.events, outcome.events);
        assert_eq!(read.catalog.last_updated, outcome.refreshed_at);
    }

    #[tokio::test]
    async fn test_all_sources_failing_uses_samples() {
        let clock = Arc::new(FixedClock::new(1));
        let store = CatalogStore::new(Arc::new(MemoryStore::new()));

        let outcome =
            scrape_all_events(&scraper(fixtures::all_failing(), clock.clone()), &store, clock.as_ref())
                .await;

        assert_eq!(outcome.origin, ScrapeOrigin::Sample);
        let expected: Vec<String> = sample_events(0).into_iter().map(|e| e.title).collect();
        assert_eq!(titles(&outcome.events), expected);
        assert_eq!(outcome.source_failures(), 3);
        assert_eq!(store.load().await.catalog.events, outcome.events);
    }

    #[tokio::test]
    async fn test_one_failing_source_keeps_the_rest() {
        let clock = Arc::new(FixedClock::new(1));
        let store = CatalogStore::new(Arc::new(MemoryStore::new()));
        let fetcher = fixtures::all_sources().failing(fixtures::TIMEOUT_URL);

        let outcome = scrape_all_events(&scraper(fetcher, clock.clone()), &store, clock.as_ref()).await;

        assert_eq!(outcome.origin, ScrapeOrigin::Live);
        assert_eq!(titles(&outcome.events), vec!["Sydney Festival", "Startup Drinks"]);
        assert_eq!(outcome.source_failures(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_still_returns_events() {
        let clock = Arc::new(FixedClock::new(1));
        let store = CatalogStore::new(Arc::new(FailingStore));

        let outcome =
            scrape_all_events(&scraper(fixtures::all_sources(), clock.clone()), &store, clock.as_ref())
                .await;

        assert_eq!(outcome.events.len(), fixtures::TITLES.len());
        assert!(matches!(outcome.store_error, Some(AppError::Store(_))));
    }

    #[tokio::test]
    async fn test_dead_task_falls_back_to_samples() {
        let clock = Arc::new(FixedClock::new(1));
        let store = CatalogStore::new(Arc::new(MemoryStore::new()));
        let mut sources = default_sources();
        sources.push(Arc::new(PanickingSource));
        let scraper = EventScraper::new(Arc::new(fixtures::all_sources()), sources, clock.clone());

        let outcome = scrape_all_events(&scraper, &store, clock.as_ref()).await;

        assert_eq!(outcome.origin, ScrapeOrigin::Sample);
        assert!(matches!(outcome.aggregate_error, Some(AppError::Task(_))));
        assert!(outcome.reports.is_empty());
        // the fallback catalog is persisted like any other
        assert_eq!(store.load().await.catalog.events.len(), 6);
    }
}

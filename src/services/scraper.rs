// src/services/scraper.rs

//! Event scraper service.
//!
//! Fetches every registered source concurrently and extracts its events.
//! Failures are contained per source: a source that cannot be fetched or
//! parsed contributes nothing and is reported in its [`SourceReport`].

use std::sync::Arc;

use futures::future::join_all;

use crate::error::{AppError, Result};
use crate::models::Event;
use crate::services::sources::SourceExtractor;
use crate::utils::clock::Clock;
use crate::utils::http::PageFetcher;

/// What one source contributed to a scrape.
#[derive(Debug)]
pub struct SourceReport {
    pub source: String,
    pub events: Vec<Event>,
    /// Set when the source contributed nothing because of a failure
    pub error: Option<AppError>,
}

impl SourceReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Service for scraping events from all registered sources.
#[derive(Clone)]
pub struct EventScraper {
    fetcher: Arc<dyn PageFetcher>,
    sources: Vec<Arc<dyn SourceExtractor>>,
    clock: Arc<dyn Clock>,
}

impl EventScraper {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        sources: Vec<Arc<dyn SourceExtractor>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            fetcher,
            sources,
            clock,
        }
    }

    /// Scrape all sources concurrently, one task per source.
    ///
    /// Reports come back in registration order. Only fails when a source
    /// task itself dies (panic or cancellation).
    pub async fn harvest_all(&self) -> Result<Vec<SourceReport>> {
        let now_ms = self.clock.now_ms();

        let handles: Vec<_> = self
            .sources
            .iter()
            .map(|source| {
                let fetcher = Arc::clone(&self.fetcher);
                let source = Arc::clone(source);
                tokio::spawn(
                    async move { harvest_source(fetcher.as_ref(), source.as_ref(), now_ms).await },
                )
            })
            .collect();

        // join everything before looking at failures
        let joined = join_all(handles).await;

        let mut reports = Vec::with_capacity(joined.len());
        for result in joined {
            reports.push(result?);
        }
        Ok(reports)
    }
}

async fn harvest_source(
    fetcher: &dyn PageFetcher,
    source: &dyn SourceExtractor,
    now_ms: i64,
) -> SourceReport {
    let result = match fetcher.fetch(source.url()).await {
        Ok(markup) => source.extract(&markup, now_ms),
        Err(error) => Err(error),
    };

    match result {
        Ok(events) => {
            log::debug!("{}: {} events", source.name(), events.len());
            SourceReport {
                source: source.name().to_string(),
                events,
                error: None,
            }
        }
        Err(error) => {
            log::warn!(
                "Failed to scrape {} ({}): {}",
                source.name(),
                source.url(),
                error
            );
            SourceReport {
                source: source.name().to_string(),
                events: Vec::new(),
                error: Some(error),
            }
        }
    }
}

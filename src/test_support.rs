//! Test doubles shared by unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::Event;
use crate::services::sources::SourceExtractor;
use crate::storage::KeyValueStore;
use crate::utils::clock::Clock;
use crate::utils::http::PageFetcher;

/// Fetcher serving canned markup per URL.
#[derive(Debug, Default)]
pub struct StubFetcher {
    pages: HashMap<String, String>,
    failing: HashSet<String>,
    delay: Option<Duration>,
    fetches: AtomicUsize,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, markup: &str) -> Self {
        self.pages.insert(url.to_string(), markup.to_string());
        self
    }

    /// Answer `url` with a 503.
    pub fn failing(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    /// Sleep before answering each fetch.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.contains(url) {
            return Err(AppError::Fetch {
                url: url.to_string(),
                status: 503,
            });
        }
        self.pages.get(url).cloned().ok_or_else(|| AppError::Fetch {
            url: url.to_string(),
            status: 404,
        })
    }
}

/// Store whose every operation fails.
#[derive(Debug, Default)]
pub struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(AppError::store("connection refused"))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(AppError::store("connection refused"))
    }

    async fn list_prepend(&self, _key: &str, _value: &str) -> Result<usize> {
        Err(AppError::store("connection refused"))
    }

    async fn set_add(&self, _key: &str, _member: &str) -> Result<bool> {
        Err(AppError::store("connection refused"))
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    now: AtomicI64,
}

impl FixedClock {
    pub fn new(now_ms: i64) -> Self {
        Self {
            now: AtomicI64::new(now_ms),
        }
    }

    pub fn advance(&self, ms: i64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Source whose extraction panics, killing its task.
pub struct PanickingSource;

impl SourceExtractor for PanickingSource {
    fn name(&self) -> &str {
        "Panicking"
    }

    fn url(&self) -> &str {
        fixtures::TIMEOUT_URL
    }

    fn extract(&self, _markup: &str, _now_ms: i64) -> Result<Vec<Event>> {
        panic!("extractor blew up")
    }
}

/// Listing pages for the built-in sources.
pub mod fixtures {
    use super::StubFetcher;

    pub const TIMEOUT_URL: &str =
        "https://www.timeout.com/sydney/things-to-do/things-to-do-in-sydney-today";
    pub const CITY_URL: &str = "https://whatson.cityofsydney.nsw.gov.au/events";
    pub const EVENTBRITE_URL: &str = "https://www.eventbrite.com.au/d/australia--sydney/events/";

    pub const TIMEOUT_PAGE: &str = r#"
        <div class="card-container">
          <article><h3>Vivid Sydney</h3><span class="date">Fri 23 May</span></article>
          <article><h3>Night Noodle Markets</h3></article>
        </div>
    "#;

    pub const CITY_PAGE: &str = r#"
        <div class="event-card">
          <a href="/events/sydney-festival"><h2 class="event-card__title">Sydney Festival</h2></a>
        </div>
    "#;

    pub const EVENTBRITE_PAGE: &str = r#"
        <div class="search-event-card-square">
          <a href="/e/startup-drinks-123"></a>
          <h3 class="event-card__title">Startup Drinks</h3>
        </div>
    "#;

    /// Titles produced by the three pages above, in registration order.
    pub const TITLES: [&str; 4] = [
        "Vivid Sydney",
        "Night Noodle Markets",
        "Sydney Festival",
        "Startup Drinks",
    ];

    /// Every built-in source answers with one of the pages above.
    pub fn all_sources() -> StubFetcher {
        StubFetcher::new()
            .with_page(TIMEOUT_URL, TIMEOUT_PAGE)
            .with_page(CITY_URL, CITY_PAGE)
            .with_page(EVENTBRITE_URL, EVENTBRITE_PAGE)
    }

    /// Every built-in source answers with an error.
    pub fn all_failing() -> StubFetcher {
        StubFetcher::new()
            .failing(TIMEOUT_URL)
            .failing(CITY_URL)
            .failing(EVENTBRITE_URL)
    }
}

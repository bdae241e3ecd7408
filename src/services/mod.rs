//! Service layer for the events application.
//!
//! This module contains the business logic for:
//! - Site extraction (`sources`)
//! - Concurrent scraping of all sources (`EventScraper`)
//! - The built-in fallback catalog (`sample_events`)
//! - Email capture (`subscribe`)

mod sample;
mod scraper;
pub mod sources;
mod subscriptions;

pub use sample::sample_events;
pub use scraper::{EventScraper, SourceReport};
pub use sources::{SiteExtractor, SourceExtractor, default_sources};
pub use subscriptions::subscribe;

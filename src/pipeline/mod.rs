//! Pipeline stages behind the application entry points.
//!
//! - `aggregate`: scrape every source, fall back to samples, persist
//! - `freshness`: serve the cached catalog or refresh it
//! - `lookup`: queries over a served catalog
//! - `refresh`: authorization for manual refreshes

pub mod aggregate;
pub mod freshness;
pub mod lookup;
pub mod refresh;

pub use aggregate::{ScrapeOrigin, ScrapeOutcome, scrape_all_events};
pub use freshness::{CatalogOrigin, EventsOutcome, STALENESS_THRESHOLD_MS, get_events, is_usable};
pub use lookup::{events_in_category, find_event};
pub use refresh::{RefreshResponse, authorize, bearer};

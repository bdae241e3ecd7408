// src/models/mod.rs

//! Domain models for the events pipeline.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod category;
mod config;
mod event;
mod selectors;
mod subscription;

// Re-export all public types
pub use category::{CategorySummary, UNCATEGORIZED, category_of, summarize};
pub use config::{Config, CrawlerConfig, RefreshConfig, StoreBackend, StoreConfig};
pub use event::{Catalog, Event, EventDraft, placeholder};
pub use selectors::{DescriptionRule, SiteSelectors, TicketRule};
pub use subscription::{SubscribeRequest, SubscribeResponse, Subscription};

// src/lib.rs

//! Sydney Events Library
//!
//! Scrapes Sydney event listings into a cached catalog, serves it behind a
//! freshness gate, and captures email subscriptions.

pub mod app;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use app::EventsApp;

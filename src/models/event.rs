//! Event record and catalog data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Placeholder text used when a source does not expose a field.
pub mod placeholder {
    pub const DESCRIPTION: &str = "No description available";
    pub const DATE: &str = "Date TBA";
    pub const TIME: &str = "Time TBA";
    pub const VENUE: &str = "Venue TBA";
    pub const ADDRESS: &str = "Sydney, Australia";
    pub const IMAGE_URL: &str = "/placeholder.svg?height=400&width=600";
    pub const PRICE: &str = "Price varies";
    pub const CATEGORY: &str = "Entertainment";
}

/// A single event listing.
///
/// Every field is always populated; sources fill what they cannot extract
/// with the [`placeholder`] texts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Random identifier assigned at extraction time
    pub id: String,

    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub address: String,
    pub image_url: String,
    pub ticket_url: String,
    pub price: String,
    pub category: String,

    /// Extraction time in milliseconds since epoch
    pub created_at: i64,

    /// Same as `created_at`; re-extraction produces a new record
    pub updated_at: i64,
}

impl Event {
    /// Check that no display field is blank.
    pub fn is_complete(&self) -> bool {
        [
            &self.id,
            &self.title,
            &self.description,
            &self.date,
            &self.time,
            &self.venue,
            &self.address,
            &self.image_url,
            &self.ticket_url,
            &self.price,
            &self.category,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }
}

/// Event fields before an identifier and timestamps are assigned.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub address: String,
    pub image_url: String,
    pub ticket_url: String,
    pub price: String,
    pub category: String,
}

impl EventDraft {
    /// Create a draft with the given title and placeholders everywhere else.
    pub fn titled(title: impl Into<String>, ticket_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: placeholder::DESCRIPTION.to_string(),
            date: placeholder::DATE.to_string(),
            time: placeholder::TIME.to_string(),
            venue: placeholder::VENUE.to_string(),
            address: placeholder::ADDRESS.to_string(),
            image_url: placeholder::IMAGE_URL.to_string(),
            ticket_url: ticket_url.into(),
            price: placeholder::PRICE.to_string(),
            category: placeholder::CATEGORY.to_string(),
        }
    }

    /// Finalize into an [`Event`] with a fresh id, stamped at `now_ms`.
    pub fn into_event(self, now_ms: i64) -> Event {
        Event {
            id: Uuid::new_v4().to_string(),
            title: self.title,
            description: self.description,
            date: self.date,
            time: self.time,
            venue: self.venue,
            address: self.address,
            image_url: self.image_url,
            ticket_url: self.ticket_url,
            price: self.price,
            category: self.category,
            created_at: now_ms,
            updated_at: now_ms,
        }
    }
}

/// The full set of live events plus the time they were produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub events: Vec<Event>,

    /// Milliseconds since epoch; 0 when never refreshed
    pub last_updated: i64,
}

impl Catalog {
    pub fn new(events: Vec<Event>, last_updated: i64) -> Self {
        Self {
            events,
            last_updated,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_into_event_stamps_both_timestamps() {
        let event = EventDraft::titled("Night Market", "https://example.com").into_event(1_000);
        assert_eq!(event.created_at, 1_000);
        assert_eq!(event.updated_at, 1_000);
        assert_eq!(event.venue, placeholder::VENUE);
        assert!(event.is_complete());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = EventDraft::titled("A", "https://example.com").into_event(0);
        let b = EventDraft::titled("A", "https://example.com").into_event(0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_serializes_camel_case() {
        let event = EventDraft::titled("Vivid", "https://example.com").into_event(42);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["imageUrl"], placeholder::IMAGE_URL);
        assert_eq!(json["ticketUrl"], "https://example.com");
        assert_eq!(json["createdAt"], 42);
        assert!(json.get("image_url").is_none());
    }
}

//! Read-side queries over a served catalog.

use crate::models::{Event, category_of};

/// Find an event by identifier.
pub fn find_event(events: &[Event], id: &str) -> Option<Event> {
    events.iter().find(|event| event.id == id).cloned()
}

/// Events filed under exactly `name`.
///
/// Events with a blank category are filed under `Uncategorized`.
pub fn events_in_category(events: &[Event], name: &str) -> Vec<Event> {
    events
        .iter()
        .filter(|event| category_of(event) == name)
        .cloned()
        .collect()
}

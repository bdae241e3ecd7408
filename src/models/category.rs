//! Category summaries computed from a catalog.

use serde::Serialize;

use crate::models::Event;

/// Name used for events without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Events sharing one category.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategorySummary {
    pub name: String,
    pub count: usize,
    pub events: Vec<Event>,
}

/// Category an event is filed under.
pub fn category_of(event: &Event) -> &str {
    let name = event.category.trim();
    if name.is_empty() { UNCATEGORIZED } else { name }
}

/// Group events by category, largest group first.
///
/// Groups with equal counts keep the order in which they first appeared.
pub fn summarize(events: &[Event]) -> Vec<CategorySummary> {
    let mut summaries: Vec<CategorySummary> = Vec::new();

    for event in events {
        let name = category_of(event);
        match summaries.iter_mut().find(|s| s.name == name) {
            Some(summary) => {
                summary.count += 1;
                summary.events.push(event.clone());
            }
            None => summaries.push(CategorySummary {
                name: name.to_string(),
                count: 1,
                events: vec![event.clone()],
            }),
        }
    }

    // stable sort keeps first-seen order on ties
    summaries.sort_by(|a, b| b.count.cmp(&a.count));
    summaries
}

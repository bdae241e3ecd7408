//! Eventbrite Sydney search results.

use super::SiteExtractor;
use crate::models::{DescriptionRule, SiteSelectors, TicketRule};

const URL: &str = "https://www.eventbrite.com.au/d/australia--sydney/events/";

// Result cards have no description text.
const SELECTORS: SiteSelectors = SiteSelectors {
    card: ".search-event-card-square",
    title: ".event-card__title",
    description: DescriptionRule::Fixed("Check event details on Eventbrite"),
    date: ".event-card__date",
    venue: ".event-card__venue",
    image: "img",
    ticket: TicketRule::Link("a"),
};

pub fn eventbrite() -> SiteExtractor {
    SiteExtractor::new("Eventbrite", URL, "https://www.eventbrite.com.au", SELECTORS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::placeholder;
    use crate::services::sources::SourceExtractor;

    const FIXTURE: &str = r#"
        <section>
          <div class="search-event-card-square">
            <a href="https://www.eventbrite.com.au/e/startup-drinks-123">
              <img src="https://img.evbuc.com/drinks.jpg">
            </a>
            <h3 class="event-card__title">Startup Drinks</h3>
            <p class="event-card__date">Thu, 6:00 PM</p>
            <p class="event-card__venue">Surry Hills</p>
          </div>
          <div class="search-event-card-square">
            <a href="/e/comedy-night-456"></a>
            <h3 class="event-card__title">Comedy Night</h3>
          </div>
          <div class="search-event-card-square">
            <p class="event-card__date">untitled card</p>
          </div>
        </section>
    "#;

    #[test]
    fn test_extracts_cards() {
        let events = eventbrite().extract(FIXTURE, 9).unwrap();
        assert_eq!(events.len(), 2);

        let drinks = &events[0];
        assert_eq!(drinks.title, "Startup Drinks");
        assert_eq!(drinks.description, "Check event details on Eventbrite");
        assert_eq!(drinks.date, "Thu, 6:00 PM");
        assert_eq!(drinks.venue, "Surry Hills");
        assert_eq!(drinks.image_url, "https://img.evbuc.com/drinks.jpg");
        assert_eq!(
            drinks.ticket_url,
            "https://www.eventbrite.com.au/e/startup-drinks-123"
        );
    }

    #[test]
    fn test_relative_link_and_placeholders() {
        let events = eventbrite().extract(FIXTURE, 9).unwrap();
        let comedy = &events[1];
        assert_eq!(
            comedy.ticket_url,
            "https://www.eventbrite.com.au/e/comedy-night-456"
        );
        assert_eq!(comedy.date, placeholder::DATE);
        assert_eq!(comedy.image_url, placeholder::IMAGE_URL);
        assert_eq!(comedy.category, placeholder::CATEGORY);
    }
}

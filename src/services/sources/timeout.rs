//! Time Out Sydney "things to do today" listing.

use super::SiteExtractor;
use crate::models::{DescriptionRule, SiteSelectors, TicketRule};

const URL: &str = "https://www.timeout.com/sydney/things-to-do/things-to-do-in-sydney-today";

// Cards carry no per-event link; everything points at the city landing page.
const SELECTORS: SiteSelectors = SiteSelectors {
    card: ".card-container article",
    title: "h3",
    description: DescriptionRule::Select(".card-description"),
    date: ".date",
    venue: ".venue",
    image: "img",
    ticket: TicketRule::Fixed("https://www.timeout.com/sydney"),
};

pub fn timeout_sydney() -> SiteExtractor {
    SiteExtractor::new("Time Out Sydney", URL, "https://www.timeout.com", SELECTORS)
}

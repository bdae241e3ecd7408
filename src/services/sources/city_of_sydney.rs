//! City of Sydney "What's On" listing.

use super::SiteExtractor;
use crate::models::{DescriptionRule, SiteSelectors, TicketRule};

const URL: &str = "https://whatson.cityofsydney.nsw.gov.au/events";
const ORIGIN: &str = "https://whatson.cityofsydney.nsw.gov.au";

const SELECTORS: SiteSelectors = SiteSelectors {
    card: ".event-card",
    title: ".event-card__title",
    description: DescriptionRule::Select(".event-card__description"),
    date: ".event-card__date",
    venue: ".event-card__venue",
    image: "img",
    ticket: TicketRule::Link("a"),
};

pub fn city_of_sydney() -> SiteExtractor {
    SiteExtractor::new("City of Sydney What's On", URL, ORIGIN, SELECTORS)
}

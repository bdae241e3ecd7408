//! Event listing sources.
//!
//! Each source knows the page to fetch and how to turn its markup into
//! [`Event`]s. The built-in sites share one selector-driven implementation,
//! [`SiteExtractor`], and differ only in their [`SiteSelectors`].

mod city_of_sydney;
mod eventbrite;
mod timeout;

use std::sync::Arc;

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{DescriptionRule, Event, EventDraft, SiteSelectors, TicketRule, placeholder};
use crate::utils::{clean_text, resolve_link};

pub use city_of_sydney::city_of_sydney;
pub use eventbrite::eventbrite;
pub use timeout::timeout_sydney;

/// Turns one site's listing markup into events.
pub trait SourceExtractor: Send + Sync {
    /// Human-readable source name used in logs and reports.
    fn name(&self) -> &str;

    /// Listing page to fetch.
    fn url(&self) -> &str;

    /// Extract every event with a non-empty title, stamped at `now_ms`.
    ///
    /// Only fails when a selector cannot be compiled.
    fn extract(&self, markup: &str, now_ms: i64) -> Result<Vec<Event>>;
}

/// The registered sources, in the order their events are listed.
pub fn default_sources() -> Vec<Arc<dyn SourceExtractor>> {
    vec![
        Arc::new(timeout_sydney()),
        Arc::new(city_of_sydney()),
        Arc::new(eventbrite()),
    ]
}

/// Selector-driven extractor for a single listing site.
#[derive(Debug, Clone)]
pub struct SiteExtractor {
    name: &'static str,
    url: &'static str,
    /// Base for resolving relative links
    origin: &'static str,
    selectors: SiteSelectors,
}

/// Selectors compiled once per extraction.
struct Compiled {
    card: Selector,
    title: Selector,
    description: Option<Selector>,
    date: Selector,
    venue: Selector,
    image: Selector,
    link: Option<Selector>,
}

impl SiteExtractor {
    pub const fn new(
        name: &'static str,
        url: &'static str,
        origin: &'static str,
        selectors: SiteSelectors,
    ) -> Self {
        Self {
            name,
            url,
            origin,
            selectors,
        }
    }

    fn compile(&self) -> Result<Compiled> {
        let s = &self.selectors;
        Ok(Compiled {
            card: parse_selector(s.card)?,
            title: parse_selector(s.title)?,
            description: match s.description {
                DescriptionRule::Select(sel) => Some(parse_selector(sel)?),
                DescriptionRule::Fixed(_) => None,
            },
            date: parse_selector(s.date)?,
            venue: parse_selector(s.venue)?,
            image: parse_selector(s.image)?,
            link: match s.ticket {
                TicketRule::Link(sel) => Some(parse_selector(sel)?),
                TicketRule::Fixed(_) => None,
            },
        })
    }

    fn parse_card(&self, card: &ElementRef, sel: &Compiled) -> Option<EventDraft> {
        let title = joined_text(card, &sel.title);
        if title.is_empty() {
            return None;
        }

        let ticket_url = match self.selectors.ticket {
            TicketRule::Fixed(url) => url.to_string(),
            TicketRule::Link(_) => sel
                .link
                .as_ref()
                .and_then(|link| first_attr(card, link, "href"))
                .and_then(|href| resolve_link(self.origin, href))
                .unwrap_or_else(|| self.origin.to_string()),
        };

        let mut draft = EventDraft::titled(title, ticket_url);

        draft.description = match (self.selectors.description, &sel.description) {
            (DescriptionRule::Fixed(text), _) => text.to_string(),
            (DescriptionRule::Select(_), Some(selector)) => {
                or_placeholder(joined_text(card, selector), placeholder::DESCRIPTION)
            }
            (DescriptionRule::Select(_), None) => placeholder::DESCRIPTION.to_string(),
        };
        draft.date = or_placeholder(joined_text(card, &sel.date), placeholder::DATE);
        draft.venue = or_placeholder(joined_text(card, &sel.venue), placeholder::VENUE);
        draft.image_url = first_attr(card, &sel.image, "src")
            .map(str::to_string)
            .unwrap_or_else(|| placeholder::IMAGE_URL.to_string());

        Some(draft)
    }
}

impl SourceExtractor for SiteExtractor {
    fn name(&self) -> &str {
        self.name
    }

    fn url(&self) -> &str {
        self.url
    }

    fn extract(&self, markup: &str, now_ms: i64) -> Result<Vec<Event>> {
        let compiled = self.compile()?;
        let document = Html::parse_document(markup);

        let events: Vec<Event> = document
            .select(&compiled.card)
            .filter_map(|card| self.parse_card(&card, &compiled))
            .map(|draft| draft.into_event(now_ms))
            .collect();

        log::debug!("{}: extracted {} events", self.name, events.len());
        Ok(events)
    }
}

/// Parse a CSS selector string.
pub(crate) fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| AppError::selector(selector, e))
}

/// Whitespace-normalized text of every match joined in document order,
/// empty when nothing matches.
fn joined_text(card: &ElementRef, selector: &Selector) -> String {
    let text: String = card.select(selector).flat_map(|el| el.text()).collect();
    clean_text(&text)
}

/// Non-blank attribute of the first match.
fn first_attr<'a>(card: &ElementRef<'a>, selector: &Selector, attr: &str) -> Option<&'a str> {
    card.select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn or_placeholder(text: String, fallback: &str) -> String {
    if text.is_empty() {
        fallback.to_string()
    } else {
        text
    }
}

// src/models/selectors.rs

//! CSS selectors and field rules for scraping an event listing page.

/// Where an event's description comes from.
#[derive(Debug, Clone, Copy)]
pub enum DescriptionRule {
    /// Text of the first match inside the card, placeholder when blank
    Select(&'static str),
    /// The same text for every card
    Fixed(&'static str),
}

/// Where an event's ticket URL comes from.
#[derive(Debug, Clone, Copy)]
pub enum TicketRule {
    /// The same URL for every card
    Fixed(&'static str),
    /// `href` of the first match inside the card, resolved against the origin
    Link(&'static str),
}

/// CSS selectors for one event listing site.
#[derive(Debug, Clone, Copy)]
pub struct SiteSelectors {
    /// Selector for each repeated event card
    pub card: &'static str,

    /// Selector for the title element within a card
    pub title: &'static str,

    pub description: DescriptionRule,

    /// Selector for the date element within a card
    pub date: &'static str,

    /// Selector for the venue element within a card
    pub venue: &'static str,

    /// Selector for the image element within a card (`src` is read)
    pub image: &'static str,

    pub ticket: TicketRule,
}

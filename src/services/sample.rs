//! Built-in catalog served when no source yields any events.

use crate::models::{Event, EventDraft, placeholder};

struct Sample {
    title: &'static str,
    description: &'static str,
    date: &'static str,
    time: &'static str,
    venue: &'static str,
    address: &'static str,
    ticket_url: &'static str,
    price: &'static str,
    category: &'static str,
}

const SAMPLES: [Sample; 6] = [
    Sample {
        title: "Sydney Opera House Tour",
        description: "Experience the iconic Sydney Opera House with a guided tour of this architectural masterpiece.",
        date: "Every day",
        time: "10:00 AM - 4:00 PM",
        venue: "Sydney Opera House",
        address: "Bennelong Point, Sydney NSW 2000",
        ticket_url: "https://www.sydneyoperahouse.com",
        price: "$42",
        category: "Tours",
    },
    Sample {
        title: "Bondi Beach Festival",
        description: "Annual festival celebrating beach culture with music, food, and activities for all ages.",
        date: "Saturday & Sunday",
        time: "9:00 AM - 6:00 PM",
        venue: "Bondi Beach",
        address: "Queen Elizabeth Dr, Bondi Beach NSW 2026",
        ticket_url: "https://www.bondifestival.com.au",
        price: "Free",
        category: "Festival",
    },
    Sample {
        title: "Sydney Harbour Bridge Climb",
        description: "Climb to the summit of the Sydney Harbour Bridge for breathtaking views of the city.",
        date: "Daily",
        time: "Various times",
        venue: "Sydney Harbour Bridge",
        address: "3 Cumberland St, The Rocks NSW 2000",
        ticket_url: "https://www.bridgeclimb.com",
        price: "$168 - $403",
        category: "Adventure",
    },
    Sample {
        title: "Royal Botanic Garden Walk",
        description: "Guided tour of Australia's oldest botanic garden featuring native and exotic plants.",
        date: "Weekdays",
        time: "10:30 AM - 12:00 PM",
        venue: "Royal Botanic Garden",
        address: "Mrs Macquaries Rd, Sydney NSW 2000",
        ticket_url: "https://www.rbgsyd.nsw.gov.au",
        price: "$15",
        category: "Nature",
    },
    Sample {
        title: "Taronga Zoo Sydney",
        description: "Visit Australia's leading zoological park featuring over 4,000 animals from around the world.",
        date: "Open daily",
        time: "9:30 AM - 5:00 PM",
        venue: "Taronga Zoo",
        address: "Bradleys Head Rd, Mosman NSW 2088",
        ticket_url: "https://taronga.org.au/sydney-zoo",
        price: "$44.10 - $49",
        category: "Family",
    },
    Sample {
        title: "Sydney Fish Market Tour",
        description: "Behind-the-scenes tour of the largest working fish market in the Southern Hemisphere.",
        date: "Mondays, Thursdays, and Fridays",
        time: "6:40 AM - 8:15 AM",
        venue: "Sydney Fish Market",
        address: "Bank St & Pyrmont Bridge Road, Sydney NSW 2009",
        ticket_url: "https://www.sydneyfishmarket.com.au",
        price: "$35",
        category: "Food & Drink",
    },
];

/// The fallback catalog with fresh ids, stamped at `now_ms`.
pub fn sample_events(now_ms: i64) -> Vec<Event> {
    SAMPLES
        .iter()
        .map(|s| {
            EventDraft {
                title: s.title.to_string(),
                description: s.description.to_string(),
                date: s.date.to_string(),
                time: s.time.to_string(),
                venue: s.venue.to_string(),
                address: s.address.to_string(),
                image_url: placeholder::IMAGE_URL.to_string(),
                ticket_url: s.ticket_url.to_string(),
                price: s.price.to_string(),
                category: s.category.to_string(),
            }
            .into_event(now_ms)
        })
        .collect()
}

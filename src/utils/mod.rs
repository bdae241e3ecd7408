//! Utility functions and helpers.

pub mod clock;
pub mod http;
pub mod log;

use url::Url;

/// Resolve a potentially relative link against a site origin.
///
/// Absolute `http(s)` links are returned unchanged. Returns `None` when the
/// link is blank or cannot be joined onto the origin.
pub fn resolve_link(origin: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    Url::parse(origin)
        .and_then(|base| base.join(href))
        .map(|u| u.to_string())
        .ok()
}

/// Collapse runs of whitespace into single spaces and trim.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_link() {
        let origin = "https://whatson.cityofsydney.nsw.gov.au";
        assert_eq!(
            resolve_link(origin, "/events/vivid"),
            Some("https://whatson.cityofsydney.nsw.gov.au/events/vivid".to_string())
        );
        assert_eq!(
            resolve_link(origin, "events/vivid"),
            Some("https://whatson.cityofsydney.nsw.gov.au/events/vivid".to_string())
        );
        assert_eq!(
            resolve_link(origin, "https://other.com/x?y=1"),
            Some("https://other.com/x?y=1".to_string())
        );
        assert_eq!(resolve_link(origin, "   "), None);
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  Vivid\n   Sydney \t2026 "), "Vivid Sydney 2026");
        assert_eq!(clean_text("\n\t "), "");
    }
}

//! Bearer-token guard for manually triggered refreshes.

use serde::Serialize;

use crate::error::{AppError, Result};
use crate::pipeline::aggregate::ScrapeOutcome;

/// Reply to an authorized refresh.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RefreshResponse {
    pub success: bool,
    pub message: String,
}

impl RefreshResponse {
    pub fn from_outcome(outcome: &ScrapeOutcome) -> Self {
        Self {
            success: true,
            message: format!("Successfully scraped {} events", outcome.events.len()),
        }
    }
}

/// Check an `Authorization` header against the configured secret.
///
/// Without a configured secret nobody is authorized.
pub fn authorize(authorization: Option<&str>, secret: Option<&str>) -> Result<()> {
    let secret = secret.filter(|s| !s.is_empty()).ok_or(AppError::Unauthorized)?;
    let header = authorization.ok_or(AppError::Unauthorized)?;

    match header.strip_prefix("Bearer ") {
        Some(token) if token == secret => Ok(()),
        _ => Err(AppError::Unauthorized),
    }
}

/// Format a token as an `Authorization` header value.
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

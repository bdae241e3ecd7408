//! Subscription request, record and response types.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Incoming subscription form.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub event_id: String,

    /// Echoed back so the caller can redirect to the ticket page
    #[serde(default)]
    pub ticket_url: Option<String>,
}

/// A captured email tied to one event. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub email: String,
    pub event_id: String,
    pub timestamp: i64,
}

/// Result reported to the subscribing user.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeResponse {
    pub success: bool,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_url: Option<String>,

    /// False when the record could not be written to the store
    #[serde(skip)]
    pub persisted: bool,
}

impl SubscribeResponse {
    pub const INVALID_MESSAGE: &'static str = "Invalid email or event ID";
    pub const SUCCESS_MESSAGE: &'static str =
        "Thank you for subscribing! Redirecting to ticket page...";

    pub fn rejected() -> Self {
        Self {
            success: false,
            message: Self::INVALID_MESSAGE.to_string(),
            ticket_url: None,
            persisted: false,
        }
    }

    pub fn accepted(ticket_url: Option<String>, persisted: bool) -> Self {
        Self {
            success: true,
            message: Self::SUCCESS_MESSAGE.to_string(),
            ticket_url,
            persisted,
        }
    }
}

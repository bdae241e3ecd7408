//! Email capture for event subscriptions.

use validator::Validate;

use crate::models::{SubscribeRequest, SubscribeResponse, Subscription};
use crate::storage::CatalogStore;
use crate::utils::clock::Clock;

/// Validate and record a subscription.
///
/// Invalid input is rejected without touching the store. A failed write is
/// logged and reported through `persisted`, but the subscriber still gets a
/// successful response.
pub async fn subscribe(
    store: &CatalogStore,
    clock: &dyn Clock,
    request: SubscribeRequest,
) -> SubscribeResponse {
    if let Err(errors) = request.validate() {
        log::debug!("Rejected subscription: {}", errors);
        return SubscribeResponse::rejected();
    }

    let subscription = Subscription {
        email: request.email,
        event_id: request.event_id,
        timestamp: clock.now_ms(),
    };

    let persisted = match store.append_subscription(&subscription).await {
        Ok(()) => true,
        Err(error) => {
            log::warn!(
                "Failed to store subscription for event {}: {}",
                subscription.event_id,
                error
            );
            false
        }
    };

    SubscribeResponse::accepted(request.ticket_url, persisted)
}

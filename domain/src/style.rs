//! Bulk style-preference update across a user's reservations.

use crate::error::Error;
use entity::Id;
use entity_api::ReservationStore;
use events::{DomainEvent, EventPublisher};
use log::*;
use serde_json::Value;

/// Replace the `styles` field on every document the user owns and notify
/// their open channels. The frontend sends the whole preference object each
/// time, so this is a wholesale replace, not a merge.
pub async fn update_styles(
    store: &dyn ReservationStore,
    publisher: &EventPublisher,
    user_id: Id,
    styles: Value,
) -> Result<u64, Error> {
    // The preference object always nests per-status styles; anything else is
    // a malformed client payload.
    if styles.get("statusStyles").is_none() {
        return Err(Error::validation(
            "styles must include a statusStyles object",
        ));
    }

    let updated = store.set_styles(user_id, styles.clone()).await?;
    debug!("Updated styles on {updated} reservation(s) for user {user_id}");

    publisher
        .publish(DomainEvent::StylesUpdated { user_id, styles })
        .await;

    Ok(updated)
}

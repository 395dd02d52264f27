//! Notification records that mint single-use retrieval tokens.

use serde::{Deserialize, Serialize};

/// A parking notification sent about an item.
///
/// `kind` is free-form ("parked_incorrectly_notification",
/// "appears_abandoned_notification", ...); the retrieval link token proves
/// receipt of this specific notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParkingNotification {
    pub id: i64,
    pub item_id: i64,
    pub kind: String,
    pub retrieval_link_token: String,
    pub created_at: i64,
}

/// A graduated notification sent when an item ages out of an organization.
///
/// The marked-remaining link token lets the recipient flag the item as
/// still present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraduatedNotification {
    pub id: i64,
    pub item_id: i64,
    pub marked_remaining_link_token: String,
    pub created_at: i64,
}

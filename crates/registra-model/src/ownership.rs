//! Ownership claim records.

use serde::{Deserialize, Serialize};

/// A claim record linking an actor to an item.
///
/// The "current" ownership is the most recent record for the item. An
/// unclaimed ownership carries the email (and optionally the resolved user
/// id) of the designated owner, who proves the claim with `claim_token`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ownership {
    pub id: i64,
    pub item_id: i64,
    /// Resolved user this ownership belongs to, once known.
    pub user_id: Option<i64>,
    /// Email the ownership was created for; matched when claiming.
    pub owner_email: Option<String>,
    pub claimed: bool,
    pub claimed_at: Option<i64>,
    /// Opaque single-use token minted when the ownership was created.
    pub claim_token: String,
    /// Optional message from the sender, surfaced to the claimant.
    pub claim_message: Option<String>,
    pub created_at: i64,
}

//! Organizations and per-item organization links.

use serde::{Deserialize, Serialize};

/// A tenant organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: i64,
    pub name: String,
}

/// Link between an item and an organization that registered or manages it.
///
/// `can_edit_claimed` controls whether members of the organization may edit
/// the item after its ownership has been claimed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemOrganization {
    pub item_id: i64,
    pub organization_id: i64,
    pub can_edit_claimed: bool,
}

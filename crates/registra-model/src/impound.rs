//! Impound hold records.

use serde::{Deserialize, Serialize};

/// An administrative hold on an item, optionally scoped to an organization.
///
/// At most one unresolved record exists per item; an unresolved record
/// blocks editing regardless of ownership state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpoundRecord {
    pub id: i64,
    pub item_id: i64,
    pub organization_id: Option<i64>,
    pub created_at: i64,
    pub resolved_at: Option<i64>,
}

impl ImpoundRecord {
    /// Whether the hold is scoped to an organization.
    pub fn organized(&self) -> bool {
        self.organization_id.is_some()
    }

    /// Whether the hold is still in effect.
    pub fn active(&self) -> bool {
        self.resolved_at.is_none()
    }
}

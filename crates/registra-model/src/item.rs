//! The item record and its status taxonomy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lifecycle status of an item.
///
/// Stored as a lowercase string column; `as_str`/`FromStr` round-trip the
/// storage representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// Registered to an owner, nothing outstanding.
    WithOwner,
    /// Reported stolen.
    Stolen,
    /// Reported found by a third party.
    Found,
    /// Held under an impound record.
    Impounded,
    /// Flagged as abandoned in place.
    Abandoned,
    /// Created from a notification against an unregistered item.
    Unregistered,
}

/// Error parsing a status string from storage.
#[derive(Debug, Error)]
#[error("unknown item status: {0}")]
pub struct StatusParseError(pub String);

impl ItemStatus {
    /// Storage representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WithOwner => "with_owner",
            Self::Stolen => "stolen",
            Self::Found => "found",
            Self::Impounded => "impounded",
            Self::Abandoned => "abandoned",
            Self::Unregistered => "unregistered",
        }
    }

    /// Whether the item is currently reported stolen.
    pub fn is_stolen(&self) -> bool {
        matches!(self, Self::Stolen)
    }

    /// Whether the item is currently reported found.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found)
    }

    /// Whether the item is stolen or impounded.
    pub fn is_stolen_or_impounded(&self) -> bool {
        matches!(self, Self::Stolen | Self::Impounded)
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "with_owner" => Ok(Self::WithOwner),
            "stolen" => Ok(Self::Stolen),
            "found" => Ok(Self::Found),
            "impounded" => Ok(Self::Impounded),
            "abandoned" => Ok(Self::Abandoned),
            "unregistered" => Ok(Self::Unregistered),
            other => Err(StatusParseError(other.to_string())),
        }
    }
}

/// A physical asset record under registry control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    /// Display label for the kind of asset ("bike", "trailer", ...).
    pub item_type: String,
    pub status: ItemStatus,
    /// Hidden from public listing by the owner or an admin.
    pub hidden: bool,
    /// Soft-delete timestamp; a deleted item stays in storage.
    pub deleted_at: Option<i64>,
    pub created_at: i64,
}

impl Item {
    /// Whether the item has been soft-deleted.
    pub fn deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn is_stolen(&self) -> bool {
        self.status.is_stolen()
    }

    pub fn is_found(&self) -> bool {
        self.status.is_found()
    }

    pub fn is_stolen_or_impounded(&self) -> bool {
        self.status.is_stolen_or_impounded()
    }
}

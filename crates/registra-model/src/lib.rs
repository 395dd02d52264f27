//! Domain records for the registra asset registry.
//!
//! This crate holds the shared vocabulary used by the store and the
//! authorization engine: the item record and its status taxonomy, ownership
//! claims, organizations and per-item organization links, impound holds,
//! and the two notification record kinds that mint single-use retrieval
//! tokens. Records are plain data; persistence and decision logic live in
//! the `registra` crate.

mod impound;
mod item;
mod notification;
mod organization;
mod ownership;
mod user;

pub use impound::ImpoundRecord;
pub use item::{Item, ItemStatus, StatusParseError};
pub use notification::{GraduatedNotification, ParkingNotification};
pub use organization::{ItemOrganization, Organization};
pub use ownership::Ownership;
pub use user::User;

/// Identifier of an [`Item`].
pub type ItemId = i64;
/// Identifier of a [`User`].
pub type UserId = i64;
/// Identifier of an [`Organization`].
pub type OrgId = i64;

/// Current unix timestamp in seconds.
pub fn now_ts() -> i64 {
    chrono::Utc::now().timestamp()
}

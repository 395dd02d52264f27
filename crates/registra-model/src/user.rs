//! User records.

use serde::{Deserialize, Serialize};

/// A registered user. Requests may also be anonymous (no user at all).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub superuser: bool,
    /// Organization used as the fallback scope for this user's sessions.
    pub default_organization_id: Option<i64>,
}

//! Item lookup gate.
//!
//! Resolves an item by identifier without any active-only scoping, so the
//! visibility rule for hidden and soft-deleted records runs here instead
//! of silently 404-ing at the storage layer.

use crate::db::{Database, DbError};
use crate::error::LookupError;
use crate::telemetry::spans;
use registra_model::{Item, User};
use tracing::{Instrument, debug};

/// Request parameters that can carry an item identifier.
#[derive(Debug, Default, Clone)]
pub struct LookupParams {
    pub id: Option<String>,
    pub scanned_id: Option<String>,
    pub card_id: Option<String>,
}

impl LookupParams {
    /// The identifier from `id`, `scanned_id`, or `card_id`, in that order.
    pub fn scanned_identifier(&self) -> Option<&str> {
        [&self.id, &self.scanned_id, &self.card_id]
            .into_iter()
            .find_map(|v| v.as_deref().filter(|s| !s.trim().is_empty()))
    }
}

/// Gate resolving items and enforcing visibility.
pub struct LookupGate<'a> {
    db: &'a Database,
}

impl<'a> LookupGate<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Resolve an item by identifier for the given actor.
    ///
    /// Identifiers the storage layer rejects as value-out-of-range are
    /// remapped to [`LookupError::NotFound`]; every other storage failure
    /// propagates unchanged. Hidden or soft-deleted items resolve only for
    /// actors the item's own visibility rule accepts.
    pub async fn lookup(
        &self,
        identifier: &str,
        actor: Option<&User>,
    ) -> Result<Item, LookupError> {
        let span = spans::lookup(identifier);
        async {
            let item = match self.db.items().find_by_identifier(identifier).await {
                Ok(Some(item)) => item,
                Ok(None) => return Err(self.not_found()),
                Err(DbError::IdOutOfRange(_)) => return Err(self.not_found()),
                Err(e) => return Err(LookupError::Storage(e)),
            };

            if item.hidden || item.deleted() {
                let visible = match actor {
                    Some(user) => self
                        .db
                        .items()
                        .visible_by(&item, user)
                        .await
                        .map_err(LookupError::Storage)?,
                    None => false,
                };
                if !visible {
                    return Err(self.not_found());
                }
            }

            Ok(item)
        }
        .instrument(span)
        .await
    }

    fn not_found(&self) -> LookupError {
        crate::metrics::record_lookup_not_found();
        debug!("Item lookup resolved to not-found");
        LookupError::NotFound
    }
}

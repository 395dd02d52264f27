//! Active-organization scope resolution.
//!
//! Decides which organization context is in effect for a request. The
//! decision itself is a pure function; the resolver wraps it with the
//! membership lookup and returns the *new* context value. Callers persist
//! the result into session state; nothing is mutated here.

use crate::db::{Database, DbError};
use registra_model::{OrgId, User};
use tracing::debug;

/// Compute the next organization scope.
///
/// An explicit `requested_org_id` on the call is treated as a signal of
/// intent (e.g. a scanned sticker belonging to a child organization) and
/// falls back to the actor's default organization when the current context
/// is not authorized. Absent that signal, an unauthorized stale context is
/// cleared rather than silently kept.
pub fn next_scope(
    actor: Option<&User>,
    requested_org_id: Option<OrgId>,
    current: Option<OrgId>,
    current_authorized: bool,
    force_blank: bool,
) -> Option<OrgId> {
    if force_blank {
        return current;
    }
    let Some(actor) = actor else {
        return current;
    };

    if actor.default_organization_id.is_some() && requested_org_id.is_some() {
        if current.is_some() && current_authorized {
            current
        } else {
            actor.default_organization_id
        }
    } else if current.is_none() || current_authorized {
        current
    } else {
        None
    }
}

/// Store-backed organization scope resolver.
pub struct OrgScopeResolver<'a> {
    db: &'a Database,
}

impl<'a> OrgScopeResolver<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Resolve the organization scope for a request.
    ///
    /// Reads the current context before anything else, checks the actor's
    /// membership in it, and returns the new context value for the caller
    /// to persist.
    pub async fn resolve(
        &self,
        actor: Option<&User>,
        requested_org_id: Option<OrgId>,
        current: Option<OrgId>,
        force_blank: bool,
    ) -> Result<Option<OrgId>, DbError> {
        let current_authorized = match (actor, current) {
            (Some(user), Some(org)) => {
                self.db.organizations().authorized(user.id, org).await?
            }
            _ => false,
        };

        let next = next_scope(actor, requested_org_id, current, current_authorized, force_blank);
        if next != current {
            debug!(current = ?current, next = ?next, "Organization scope changed");
        }
        Ok(next)
    }
}

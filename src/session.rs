//! Session-scoped request context.
//!
//! The decision core reads and writes two pieces of cross-request state:
//! the active organization ("passive organization") and the post-login
//! return-to path. Both live in a [`SessionContext`] owned by the caller's
//! session layer; the scope resolver returns a new organization value for
//! the caller to persist rather than mutating anything in place.

use dashmap::DashMap;
use registra_model::OrgId;
use uuid::Uuid;

/// Session-scoped mutable state for one acting session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    organization_id: Option<OrgId>,
    return_to: Option<String>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The organization currently in effect for this session.
    pub fn organization(&self) -> Option<OrgId> {
        self.organization_id
    }

    /// Persist a resolved organization scope.
    pub fn set_organization(&mut self, organization_id: Option<OrgId>) {
        self.organization_id = organization_id;
    }

    /// The stored post-login return target, if any.
    pub fn return_to(&self) -> Option<&str> {
        self.return_to.as_deref()
    }

    /// Store the current request path as the post-login return target.
    pub fn store_return_to(&mut self, path: impl Into<String>) {
        self.return_to = Some(path.into());
    }

    /// Take the stored return target, clearing it.
    pub fn take_return_to(&mut self) -> Option<String> {
        self.return_to.take()
    }
}

/// Process-wide registry of live session contexts, keyed by session id.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<Uuid, SessionContext>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh session and return its id.
    pub fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions.insert(id, SessionContext::new());
        id
    }

    /// Snapshot the context for a session.
    pub fn get(&self, id: Uuid) -> Option<SessionContext> {
        self.sessions.get(&id).map(|entry| entry.clone())
    }

    /// Apply a mutation to a session's context. Returns false when the
    /// session is unknown (expired or never created).
    pub fn update(&self, id: Uuid, apply: impl FnOnce(&mut SessionContext)) -> bool {
        match self.sessions.get_mut(&id) {
            Some(mut entry) => {
                apply(&mut entry);
                true
            }
            None => false,
        }
    }

    /// Drop a session's context.
    pub fn remove(&self, id: Uuid) {
        self.sessions.remove(&id);
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_to_round_trip() {
        let mut context = SessionContext::new();
        assert!(context.return_to().is_none());
        context.store_return_to("/items/42/edit");
        assert_eq!(context.return_to(), Some("/items/42/edit"));
        assert_eq!(context.take_return_to().as_deref(), Some("/items/42/edit"));
        assert!(context.return_to().is_none());
    }

    #[test]
    fn registry_tracks_sessions() {
        let registry = SessionRegistry::new();
        let id = registry.create();
        assert_eq!(registry.len(), 1);

        assert!(registry.update(id, |context| context.set_organization(Some(7))));
        assert_eq!(registry.get(id).unwrap().organization(), Some(7));

        registry.remove(id);
        assert!(registry.is_empty());
        assert!(!registry.update(id, |context| context.set_organization(None)));
    }
}

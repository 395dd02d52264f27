//! Unified error handling for registra.
//!
//! This module provides the denial taxonomy for edit authorization, the
//! terminal verdict type, and the lookup gate's error taxonomy. Denials are
//! values, not faults: the engine resolves every expected denial path into
//! a [`Verdict`], and only unexpected storage failures propagate as errors.

use crate::db::DbError;
use crate::i18n::{MessageArgs, MessageKey, Translator};
use thiserror::Error;

/// Reasons an edit can be denied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DenialKind {
    /// The item is held under an organization-scoped impound record.
    #[error("item impounded by {org_name}")]
    ImpoundedByOrganization { org_name: String },

    /// The item is held under an impound record with no organization.
    #[error("item impounded")]
    Impounded,

    /// The actor is signed in but does not own the item.
    #[error("actor does not own the item")]
    NotOwner,

    /// The item's ownership is claimed; the actor must sign in.
    #[error("sign in required")]
    SignInRequired,

    /// The item's ownership has never been claimed.
    #[error("ownership not claimed yet")]
    NotClaimedYet,
}

impl DenialKind {
    /// Get a static code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ImpoundedByOrganization { .. } => "impounded_by_organization",
            Self::Impounded => "impounded",
            Self::NotOwner => "not_owner",
            Self::SignInRequired => "sign_in_required",
            Self::NotClaimedYet => "not_claimed_yet",
        }
    }

    /// Catalog key for the user-facing message.
    pub fn message_key(&self) -> MessageKey {
        match self {
            Self::ImpoundedByOrganization { .. } => MessageKey::ImpoundedByOrganization,
            Self::Impounded => MessageKey::Impounded,
            Self::NotOwner => MessageKey::NotOwner,
            Self::SignInRequired => MessageKey::SignInRequired,
            Self::NotClaimedYet => MessageKey::NotClaimedYet,
        }
    }

    /// Render the user-facing notice for this denial.
    pub fn render(&self, translator: &Translator, item_type: &str) -> String {
        let org_name = match self {
            Self::ImpoundedByOrganization { org_name } => Some(org_name.as_str()),
            _ => None,
        };
        translator.translate(
            self.message_key(),
            MessageArgs {
                item_type,
                org_name,
            },
        )
    }
}

/// Terminal verdict of the edit authorization engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The actor may edit; the caller proceeds.
    Allowed,
    /// The actor may not edit; show `message` and redirect to `redirect`.
    Denied {
        kind: DenialKind,
        message: String,
        redirect: String,
    },
}

impl Verdict {
    /// Whether the verdict allows the edit.
    pub fn allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Errors from the item lookup gate.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The identifier does not resolve to a visible item. Includes
    /// value-out-of-range identifiers remapped from the storage layer.
    #[error("item not found")]
    NotFound,

    /// Any other storage failure, propagated unchanged.
    #[error(transparent)]
    Storage(DbError),
}

impl LookupError {
    /// Whether this is the not-found outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

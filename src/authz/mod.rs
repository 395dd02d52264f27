//! Authorization decision paths.
//!
//! The edit authorization engine lives here, together with the item lookup
//! gate, the organization scope resolver, and the token classifier it is
//! composed with by the request-handling layer.

mod lookup;
mod scope;
mod tokens;

pub use lookup::{LookupGate, LookupParams};
pub use scope::{OrgScopeResolver, next_scope};
pub use tokens::{
    FALLBACK_TOKEN_TYPE, GRADUATED_TOKEN_TYPE, MatchingNotification, TokenClassification,
    TokenClassifier, TokenParams,
};

use crate::db::{Database, DbError};
use crate::error::{DenialKind, Verdict};
use crate::i18n::Translator;
use crate::session::SessionContext;
use crate::telemetry::{DecisionTimer, spans};
use registra_model::{Item, ItemId, User};
use tracing::{Instrument, info};

/// Canonical view path for an item; denial verdicts redirect here.
pub fn item_path(id: ItemId) -> String {
    format!("/items/{id}")
}

/// The top-level edit authorization engine.
///
/// Consumes the looked-up item, the actor, and the session context, and
/// produces a terminal [`Verdict`]. Denials are values; only unexpected
/// storage failures surface as errors.
pub struct EditAuthorizer<'a> {
    db: &'a Database,
    translator: &'a Translator,
}

impl<'a> EditAuthorizer<'a> {
    pub fn new(db: &'a Database, translator: &'a Translator) -> Self {
        Self { db, translator }
    }

    /// Decide whether `actor` may edit `item`.
    ///
    /// Branches are mutually exclusive and evaluated in order: the item's
    /// claim/authorize capability (which may claim an unclaimed ownership
    /// for the actor as a side effect), then impound holds, then the
    /// signed-in-non-owner and anonymous cases. For anonymous actors the
    /// request path is stored on the session as the post-login return
    /// target before the denial is produced.
    pub async fn authorize_edit(
        &self,
        item: &Item,
        actor: Option<&User>,
        session: &mut SessionContext,
        request_path: &str,
    ) -> Result<Verdict, DbError> {
        let span = spans::request(request_path, actor.map(|u| u.id));
        async {
            let _timer = DecisionTimer::new("authorize_edit");

            if let Some(user) = actor
                && self
                    .db
                    .items()
                    .authorize_and_claim_for_user(item, user)
                    .await?
            {
                crate::metrics::record_decision("allowed");
                return Ok(Verdict::Allowed);
            }

            let kind = if let Some(impound) = self.db.impounds().current_for_item(item.id).await? {
                match impound.organization_id {
                    Some(org_id) => match self.db.organizations().find(org_id).await? {
                        Some(org) => DenialKind::ImpoundedByOrganization { org_name: org.name },
                        None => DenialKind::Impounded,
                    },
                    None => DenialKind::Impounded,
                }
            } else if actor.is_some() {
                DenialKind::NotOwner
            } else {
                session.store_return_to(request_path);
                let ownership = self.db.ownerships().current_for_item(item.id).await?;
                if ownership.is_some_and(|o| o.claimed) {
                    DenialKind::SignInRequired
                } else {
                    DenialKind::NotClaimedYet
                }
            };

            let message = kind.render(self.translator, &item.item_type);
            if message.is_empty() {
                // Never present a blank error notice.
                crate::metrics::record_decision("allowed");
                return Ok(Verdict::Allowed);
            }

            crate::metrics::record_decision("denied");
            crate::metrics::record_denial(kind.error_code());
            info!(item = item.id, code = kind.error_code(), "Edit denied");

            Ok(Verdict::Denied {
                kind,
                message,
                redirect: item_path(item.id),
            })
        }
        .instrument(span)
        .await
    }
}

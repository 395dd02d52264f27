//! Single-use token classification.
//!
//! A token-bearing request is matched against the item's associated
//! records: the ownership claim token (an orthogonal side channel exposing
//! the claim message), a parking notification retrieval token, or a
//! graduated notification marked-remaining token.

use crate::db::{Database, DbError};
use registra_model::{GraduatedNotification, Item, ParkingNotification};
use subtle::ConstantTimeEq;

/// Token type assigned to every graduated-notification token.
pub const GRADUATED_TOKEN_TYPE: &str = "graduated_notification";

/// Fallback token type when a present token resolves to no record.
pub const FALLBACK_TOKEN_TYPE: &str = "parked_incorrectly_notification";

/// Token-bearing request parameters.
#[derive(Debug, Default, Clone)]
pub struct TokenParams {
    /// Ownership claim token (`t` in the original request surface).
    pub claim_token: Option<String>,
    pub parking_notification_retrieved: Option<String>,
    pub graduated_notification_remaining: Option<String>,
}

/// The notification record a token resolved to.
#[derive(Debug, Clone)]
pub enum MatchingNotification {
    Parking(ParkingNotification),
    Graduated(GraduatedNotification),
}

/// Terminal classification result.
///
/// `token_type` is `None` only when no retrieval token was present at all;
/// a present-but-unresolvable token still classifies (to the fallback
/// type), so it never aborts the surrounding flow.
#[derive(Debug, Default, Clone)]
pub struct TokenClassification {
    pub claim_message: Option<String>,
    pub token_type: Option<String>,
    pub matching_notification: Option<MatchingNotification>,
}

impl TokenClassification {
    /// Whether any retrieval token was present on the request.
    pub fn token_present(&self) -> bool {
        self.token_type.is_some()
    }
}

/// Classifies request-supplied tokens against an item's records.
pub struct TokenClassifier<'a> {
    db: &'a Database,
}

impl<'a> TokenClassifier<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Classify the tokens on a request against `item`.
    pub async fn classify(
        &self,
        item: &Item,
        params: &TokenParams,
    ) -> Result<TokenClassification, DbError> {
        let mut classification = TokenClassification::default();

        // Claim-token side channel, independent of the rest of the
        // classification.
        if let Some(token) = non_blank(&params.claim_token)
            && let Some(ownership) = self.db.ownerships().current_for_item(item.id).await?
            && tokens_match(token, &ownership.claim_token)
        {
            classification.claim_message = ownership.claim_message;
        }

        let Some((token, parking)) = non_blank(&params.parking_notification_retrieved)
            .map(|t| (t, true))
            .or_else(|| non_blank(&params.graduated_notification_remaining).map(|t| (t, false)))
        else {
            return Ok(classification);
        };

        if parking {
            let matching = self
                .db
                .notifications()
                .parking_by_retrieval_token(item.id, token)
                .await?;
            classification.token_type = matching.as_ref().map(|n| n.kind.clone());
            classification.matching_notification = matching.map(MatchingNotification::Parking);
        } else {
            let matching = self
                .db
                .notifications()
                .graduated_by_remaining_token(item.id, token)
                .await?;
            classification.token_type = Some(GRADUATED_TOKEN_TYPE.to_string());
            classification.matching_notification = matching.map(MatchingNotification::Graduated);
        }

        // Fallback: a present token always classifies to something.
        if classification.token_type.is_none() {
            classification.token_type = Some(FALLBACK_TOKEN_TYPE.to_string());
        }

        if let Some(token_type) = classification.token_type.as_deref() {
            crate::metrics::record_token_classification(token_type);
        }

        Ok(classification)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Exact token equality, constant-time over the compared bytes.
fn tokens_match(supplied: &str, stored: &str) -> bool {
    supplied.as_bytes().ct_eq(stored.as_bytes()).into()
}

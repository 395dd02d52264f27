//! Ownership repository: claim records linking actors to items.

use super::DbError;
use registra_model::{Ownership, now_ts};
use sqlx::SqlitePool;

/// Repository for ownership records.
pub struct OwnershipRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OwnershipRepository<'a> {
    /// Create a new ownership repository.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create an ownership record for an item.
    pub async fn create(
        &self,
        item_id: i64,
        user_id: Option<i64>,
        owner_email: Option<&str>,
        claim_token: &str,
        claim_message: Option<&str>,
    ) -> Result<Ownership, DbError> {
        let now = now_ts();
        let result = sqlx::query(
            r#"
            INSERT INTO ownerships (item_id, user_id, owner_email, claimed, claim_token, claim_message, created_at)
            VALUES (?, ?, ?, 0, ?, ?, ?)
            "#,
        )
        .bind(item_id)
        .bind(user_id)
        .bind(owner_email)
        .bind(claim_token)
        .bind(claim_message)
        .bind(now)
        .execute(self.pool)
        .await?;

        Ok(Ownership {
            id: result.last_insert_rowid(),
            item_id,
            user_id,
            owner_email: owner_email.map(String::from),
            claimed: false,
            claimed_at: None,
            claim_token: claim_token.to_string(),
            claim_message: claim_message.map(String::from),
            created_at: now,
        })
    }

    /// The current (most recent) ownership for an item.
    pub async fn current_for_item(&self, item_id: i64) -> Result<Option<Ownership>, DbError> {
        let row = sqlx::query_as::<
            _,
            (
                i64,
                i64,
                Option<i64>,
                Option<String>,
                bool,
                Option<i64>,
                String,
                Option<String>,
                i64,
            ),
        >(
            r#"
            SELECT id, item_id, user_id, owner_email, claimed, claimed_at, claim_token, claim_message, created_at
            FROM ownerships
            WHERE item_id = ?
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .bind(item_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(
            |(
                id,
                item_id,
                user_id,
                owner_email,
                claimed,
                claimed_at,
                claim_token,
                claim_message,
                created_at,
            )| Ownership {
                id,
                item_id,
                user_id,
                owner_email,
                claimed,
                claimed_at,
                claim_token,
                claim_message,
                created_at,
            },
        ))
    }

    /// Atomically claim an ownership for a user.
    ///
    /// Returns false when the ownership was already claimed (e.g. a racing
    /// request won); the record is left untouched in that case.
    pub async fn claim(&self, ownership_id: i64, user_id: i64) -> Result<bool, DbError> {
        let now = now_ts();
        let result = sqlx::query(
            r#"
            UPDATE ownerships
            SET claimed = 1, claimed_at = ?, user_id = ?
            WHERE id = ? AND claimed = 0
            "#,
        )
        .bind(now)
        .bind(user_id)
        .bind(ownership_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

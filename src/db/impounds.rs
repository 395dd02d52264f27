//! Impound record repository.

use super::DbError;
use registra_model::{ImpoundRecord, now_ts};
use sqlx::SqlitePool;
use tracing::info;

/// Repository for impound holds.
pub struct ImpoundRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ImpoundRepository<'a> {
    /// Create a new impound repository.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Place an impound hold on an item, optionally scoped to an
    /// organization.
    pub async fn create(
        &self,
        item_id: i64,
        organization_id: Option<i64>,
    ) -> Result<ImpoundRecord, DbError> {
        let now = now_ts();
        let result = sqlx::query(
            r#"
            INSERT INTO impound_records (item_id, organization_id, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(item_id)
        .bind(organization_id)
        .bind(now)
        .execute(self.pool)
        .await?;

        info!(item = item_id, organization = ?organization_id, "Impound hold placed");

        Ok(ImpoundRecord {
            id: result.last_insert_rowid(),
            item_id,
            organization_id,
            created_at: now,
            resolved_at: None,
        })
    }

    /// The active (unresolved) impound record for an item, if any.
    pub async fn current_for_item(&self, item_id: i64) -> Result<Option<ImpoundRecord>, DbError> {
        let row = sqlx::query_as::<_, (i64, i64, Option<i64>, i64, Option<i64>)>(
            r#"
            SELECT id, item_id, organization_id, created_at, resolved_at
            FROM impound_records
            WHERE item_id = ? AND resolved_at IS NULL
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .bind(item_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(
            |(id, item_id, organization_id, created_at, resolved_at)| ImpoundRecord {
                id,
                item_id,
                organization_id,
                created_at,
                resolved_at,
            },
        ))
    }

    /// Resolve an impound hold. Returns false if it was already resolved.
    pub async fn resolve(&self, impound_id: i64) -> Result<bool, DbError> {
        let now = now_ts();
        let result = sqlx::query(
            "UPDATE impound_records SET resolved_at = ? WHERE id = ? AND resolved_at IS NULL",
        )
        .bind(now)
        .bind(impound_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

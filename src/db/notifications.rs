//! Notification repositories: the records that mint single-use retrieval
//! tokens matched by the token classifier.

use super::DbError;
use registra_model::{GraduatedNotification, ParkingNotification, now_ts};
use sqlx::SqlitePool;

/// Repository for parking and graduated notifications.
pub struct NotificationRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> NotificationRepository<'a> {
    /// Create a new notification repository.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a parking notification with its retrieval link token.
    pub async fn create_parking(
        &self,
        item_id: i64,
        kind: &str,
        retrieval_link_token: &str,
    ) -> Result<ParkingNotification, DbError> {
        let now = now_ts();
        let result = sqlx::query(
            r#"
            INSERT INTO parking_notifications (item_id, kind, retrieval_link_token, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(item_id)
        .bind(kind)
        .bind(retrieval_link_token)
        .bind(now)
        .execute(self.pool)
        .await
        .map_err(unique_to_token_in_use)?;

        Ok(ParkingNotification {
            id: result.last_insert_rowid(),
            item_id,
            kind: kind.to_string(),
            retrieval_link_token: retrieval_link_token.to_string(),
            created_at: now,
        })
    }

    /// Record a graduated notification with its marked-remaining token.
    pub async fn create_graduated(
        &self,
        item_id: i64,
        marked_remaining_link_token: &str,
    ) -> Result<GraduatedNotification, DbError> {
        let now = now_ts();
        let result = sqlx::query(
            r#"
            INSERT INTO graduated_notifications (item_id, marked_remaining_link_token, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(item_id)
        .bind(marked_remaining_link_token)
        .bind(now)
        .execute(self.pool)
        .await
        .map_err(unique_to_token_in_use)?;

        Ok(GraduatedNotification {
            id: result.last_insert_rowid(),
            item_id,
            marked_remaining_link_token: marked_remaining_link_token.to_string(),
            created_at: now,
        })
    }

    /// Find a parking notification on an item by retrieval link token.
    pub async fn parking_by_retrieval_token(
        &self,
        item_id: i64,
        token: &str,
    ) -> Result<Option<ParkingNotification>, DbError> {
        let row = sqlx::query_as::<_, (i64, i64, String, String, i64)>(
            r#"
            SELECT id, item_id, kind, retrieval_link_token, created_at
            FROM parking_notifications
            WHERE item_id = ? AND retrieval_link_token = ?
            "#,
        )
        .bind(item_id)
        .bind(token)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(
            |(id, item_id, kind, retrieval_link_token, created_at)| ParkingNotification {
                id,
                item_id,
                kind,
                retrieval_link_token,
                created_at,
            },
        ))
    }

    /// Find a graduated notification on an item by marked-remaining token.
    pub async fn graduated_by_remaining_token(
        &self,
        item_id: i64,
        token: &str,
    ) -> Result<Option<GraduatedNotification>, DbError> {
        let row = sqlx::query_as::<_, (i64, i64, String, i64)>(
            r#"
            SELECT id, item_id, marked_remaining_link_token, created_at
            FROM graduated_notifications
            WHERE item_id = ? AND marked_remaining_link_token = ?
            "#,
        )
        .bind(item_id)
        .bind(token)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(
            |(id, item_id, marked_remaining_link_token, created_at)| GraduatedNotification {
                id,
                item_id,
                marked_remaining_link_token,
                created_at,
            },
        ))
    }
}

fn unique_to_token_in_use(e: sqlx::Error) -> DbError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return DbError::TokenInUse;
    }
    DbError::from(e)
}

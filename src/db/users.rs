//! User repository.

use super::DbError;
use registra_model::{User, now_ts};
use sqlx::SqlitePool;

/// Repository for user records.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a user.
    pub async fn create(
        &self,
        email: &str,
        superuser: bool,
        default_organization_id: Option<i64>,
    ) -> Result<User, DbError> {
        let now = now_ts();
        let result = sqlx::query(
            r#"
            INSERT INTO users (email, superuser, default_organization_id, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(email)
        .bind(superuser)
        .bind(default_organization_id)
        .bind(now)
        .execute(self.pool)
        .await?;

        Ok(User {
            id: result.last_insert_rowid(),
            email: email.to_string(),
            superuser,
            default_organization_id,
        })
    }

    /// Find a user by id.
    pub async fn find(&self, id: i64) -> Result<Option<User>, DbError> {
        let row = sqlx::query_as::<_, (i64, String, bool, Option<i64>)>(
            "SELECT id, email, superuser, default_organization_id FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(row_to_user))
    }

    /// Find a user by email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        let row = sqlx::query_as::<_, (i64, String, bool, Option<i64>)>(
            r#"
            SELECT id, email, superuser, default_organization_id
            FROM users
            WHERE email = ? COLLATE NOCASE
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(row_to_user))
    }
}

fn row_to_user((id, email, superuser, default_organization_id): (i64, String, bool, Option<i64>)) -> User {
    User {
        id,
        email,
        superuser,
        default_organization_id,
    }
}

//! Organization repository: tenants and the membership capability.

use super::DbError;
use registra_model::{Organization, now_ts};
use sqlx::SqlitePool;

/// Repository for organizations and memberships.
pub struct OrganizationRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrganizationRepository<'a> {
    /// Create a new organization repository.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create an organization.
    pub async fn create(&self, name: &str) -> Result<Organization, DbError> {
        let now = now_ts();
        let result = sqlx::query("INSERT INTO organizations (name, created_at) VALUES (?, ?)")
            .bind(name)
            .bind(now)
            .execute(self.pool)
            .await?;

        Ok(Organization {
            id: result.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    /// Find an organization by id.
    pub async fn find(&self, id: i64) -> Result<Option<Organization>, DbError> {
        let row = sqlx::query_as::<_, (i64, String)>(
            "SELECT id, name FROM organizations WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|(id, name)| Organization { id, name }))
    }

    /// Add a user to an organization.
    pub async fn add_member(&self, user_id: i64, organization_id: i64) -> Result<(), DbError> {
        let now = now_ts();
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO memberships (user_id, organization_id, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(organization_id)
        .bind(now)
        .execute(self.pool)
        .await?;
        Ok(())
    }

    /// Membership capability check: is the user authorized for the
    /// organization?
    pub async fn authorized(&self, user_id: i64, organization_id: i64) -> Result<bool, DbError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM memberships WHERE user_id = ? AND organization_id = ?",
        )
        .bind(user_id)
        .bind(organization_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count > 0)
    }
}

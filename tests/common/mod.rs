//! Integration test common infrastructure.
//!
//! Builds a registry over a fresh in-memory store and provides fixture
//! helpers for the record combinations the decision paths care about.

use anyhow::Result;
use registra::Translator;
use registra::db::Database;
use registra::model::{Item, ItemStatus, Organization, Ownership, User};

/// A registry backed by a fresh in-memory store.
pub struct TestRegistry {
    pub db: Database,
    pub translator: Translator,
}

#[allow(dead_code)]
impl TestRegistry {
    pub async fn new() -> Result<Self> {
        let db = Database::new(":memory:").await?;
        Ok(Self {
            db,
            translator: Translator::new(),
        })
    }

    /// Create a plain item with no ownership.
    pub async fn item(&self) -> Result<Item> {
        Ok(self.db.items().create("bike", ItemStatus::WithOwner).await?)
    }

    /// Create a user.
    pub async fn user(&self, email: &str) -> Result<User> {
        Ok(self.db.users().create(email, false, None).await?)
    }

    /// Create a superuser.
    pub async fn superuser(&self, email: &str) -> Result<User> {
        Ok(self.db.users().create(email, true, None).await?)
    }

    /// Create an organization.
    pub async fn organization(&self, name: &str) -> Result<Organization> {
        Ok(self.db.organizations().create(name).await?)
    }

    /// Create an item with an unclaimed ownership designating `email`.
    pub async fn item_with_unclaimed_ownership(
        &self,
        email: &str,
        claim_token: &str,
    ) -> Result<(Item, Ownership)> {
        let item = self.item().await?;
        let ownership = self
            .db
            .ownerships()
            .create(item.id, None, Some(email), claim_token, None)
            .await?;
        Ok((item, ownership))
    }

    /// Create an item whose ownership is claimed by `user`.
    pub async fn item_claimed_by(&self, user: &User, claim_token: &str) -> Result<Item> {
        let item = self.item().await?;
        let ownership = self
            .db
            .ownerships()
            .create(item.id, Some(user.id), Some(&user.email), claim_token, None)
            .await?;
        assert!(self.db.ownerships().claim(ownership.id, user.id).await?);
        Ok(item)
    }
}

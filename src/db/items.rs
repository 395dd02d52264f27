//! Item repository: unscoped lookup, visibility, and the claim/authorize
//! capability consumed by the edit authorization engine.

use super::{DbError, ImpoundRepository, OwnershipRepository};
use registra_model::{Item, ItemOrganization, ItemStatus, User, now_ts};
use sqlx::SqlitePool;
use tracing::info;

/// Repository for item records.
pub struct ItemRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ItemRepository<'a> {
    /// Create a new item repository.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create an item record.
    pub async fn create(&self, item_type: &str, status: ItemStatus) -> Result<Item, DbError> {
        let now = now_ts();
        let result =
            sqlx::query("INSERT INTO items (item_type, status, hidden, created_at) VALUES (?, ?, 0, ?)")
                .bind(item_type)
                .bind(status.as_str())
                .bind(now)
                .execute(self.pool)
                .await?;

        Ok(Item {
            id: result.last_insert_rowid(),
            item_type: item_type.to_string(),
            status,
            hidden: false,
            deleted_at: None,
            created_at: now,
        })
    }

    /// Unscoped lookup by raw identifier string.
    ///
    /// An identifier the id column cannot represent (non-numeric, or outside
    /// i64) fails with [`DbError::IdOutOfRange`]; callers above the storage
    /// layer decide how to surface that.
    pub async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Item>, DbError> {
        let id: i64 = identifier
            .trim()
            .parse()
            .map_err(|_| DbError::IdOutOfRange(identifier.to_string()))?;
        self.find_unscoped(id).await
    }

    /// Unscoped lookup: hidden and soft-deleted rows are still returned so
    /// visibility rules can run above the storage layer.
    pub async fn find_unscoped(&self, id: i64) -> Result<Option<Item>, DbError> {
        let row = sqlx::query_as::<_, (i64, String, String, bool, Option<i64>, i64)>(
            r#"
            SELECT id, item_type, status, hidden, deleted_at, created_at
            FROM items
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(row_to_item).transpose()
    }

    /// Update an item's status.
    pub async fn set_status(&self, item_id: i64, status: ItemStatus) -> Result<(), DbError> {
        sqlx::query("UPDATE items SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(item_id)
            .execute(self.pool)
            .await?;
        Ok(())
    }

    /// Hide or unhide an item.
    pub async fn set_hidden(&self, item_id: i64, hidden: bool) -> Result<(), DbError> {
        sqlx::query("UPDATE items SET hidden = ? WHERE id = ?")
            .bind(hidden)
            .bind(item_id)
            .execute(self.pool)
            .await?;
        Ok(())
    }

    /// Soft-delete an item. The row stays in storage.
    pub async fn soft_delete(&self, item_id: i64) -> Result<(), DbError> {
        let now = now_ts();
        sqlx::query("UPDATE items SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL")
            .bind(now)
            .bind(item_id)
            .execute(self.pool)
            .await?;
        Ok(())
    }

    /// Item-owned visibility rule for hidden or soft-deleted records.
    ///
    /// Superusers see everything. A soft-deleted item is visible to nobody
    /// else; a merely hidden item is visible to its claimed owner.
    pub async fn visible_by(&self, item: &Item, user: &User) -> Result<bool, DbError> {
        if user.superuser {
            return Ok(true);
        }
        if item.deleted() {
            return Ok(false);
        }
        if item.hidden {
            let ownership = OwnershipRepository::new(self.pool)
                .current_for_item(item.id)
                .await?;
            return Ok(ownership.is_some_and(|o| o.claimed && o.user_id == Some(user.id)));
        }
        Ok(true)
    }

    /// Item-owned claim/authorize capability.
    ///
    /// Returns true when the user may edit the item. As a side effect,
    /// atomically claims an unclaimed ownership that designates the user
    /// (by resolved user id or by email). An item under an active impound
    /// hold is never editable through this path, for anyone.
    pub async fn authorize_and_claim_for_user(
        &self,
        item: &Item,
        user: &User,
    ) -> Result<bool, DbError> {
        let impounded = ImpoundRepository::new(self.pool)
            .current_for_item(item.id)
            .await?
            .is_some();
        if impounded {
            return Ok(false);
        }

        if user.superuser {
            return Ok(true);
        }

        let ownerships = OwnershipRepository::new(self.pool);
        let current = ownerships.current_for_item(item.id).await?;

        if let Some(ownership) = &current {
            if ownership.claimed {
                if ownership.user_id == Some(user.id) {
                    return Ok(true);
                }
            } else if ownership.user_id == Some(user.id)
                || ownership
                    .owner_email
                    .as_deref()
                    .is_some_and(|email| email.eq_ignore_ascii_case(&user.email))
            {
                if ownerships.claim(ownership.id, user.id).await? {
                    crate::metrics::record_ownership_claimed();
                    info!(item = item.id, user = user.id, "Ownership claimed on edit");
                    return Ok(true);
                }
                return Ok(false);
            }
        }

        // Organization editing rights: members of a linked organization may
        // edit while the ownership is unclaimed, and afterwards only if the
        // link keeps can_edit_claimed set.
        let unclaimed = current.as_ref().is_none_or(|o| !o.claimed);
        let links = sqlx::query_as::<_, (i64, i64, bool)>(
            r#"
            SELECT io.item_id, io.organization_id, io.can_edit_claimed
            FROM item_organizations io
            JOIN memberships m ON m.organization_id = io.organization_id
            WHERE io.item_id = ? AND m.user_id = ?
            "#,
        )
        .bind(item.id)
        .bind(user.id)
        .fetch_all(self.pool)
        .await?;

        Ok(links
            .into_iter()
            .map(row_to_link)
            .any(|link| link.can_edit_claimed || unclaimed))
    }

    /// Link an organization to an item.
    pub async fn link_organization(
        &self,
        item_id: i64,
        organization_id: i64,
        can_edit_claimed: bool,
    ) -> Result<ItemOrganization, DbError> {
        sqlx::query(
            r#"
            INSERT INTO item_organizations (item_id, organization_id, can_edit_claimed)
            VALUES (?, ?, ?)
            ON CONFLICT (item_id, organization_id) DO UPDATE SET can_edit_claimed = excluded.can_edit_claimed
            "#,
        )
        .bind(item_id)
        .bind(organization_id)
        .bind(can_edit_claimed)
        .execute(self.pool)
        .await?;

        Ok(ItemOrganization {
            item_id,
            organization_id,
            can_edit_claimed,
        })
    }

    /// All organization links for an item.
    pub async fn organization_links(
        &self,
        item_id: i64,
    ) -> Result<Vec<ItemOrganization>, DbError> {
        let rows = sqlx::query_as::<_, (i64, i64, bool)>(
            r#"
            SELECT item_id, organization_id, can_edit_claimed
            FROM item_organizations
            WHERE item_id = ?
            "#,
        )
        .bind(item_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(row_to_link).collect())
    }

    /// Set which linked organizations keep edit rights after the ownership
    /// is claimed: every link in `organization_ids` gets can_edit_claimed,
    /// every other link loses it.
    pub async fn set_editing_organizations(
        &self,
        item_id: i64,
        organization_ids: &[i64],
    ) -> Result<(), DbError> {
        for link in self.organization_links(item_id).await? {
            let can_edit = organization_ids.contains(&link.organization_id);
            if can_edit == link.can_edit_claimed {
                continue;
            }
            sqlx::query(
                "UPDATE item_organizations SET can_edit_claimed = ? WHERE item_id = ? AND organization_id = ?",
            )
            .bind(can_edit)
            .bind(item_id)
            .bind(link.organization_id)
            .execute(self.pool)
            .await?;
        }
        Ok(())
    }
}

fn row_to_link(
    (item_id, organization_id, can_edit_claimed): (i64, i64, bool),
) -> ItemOrganization {
    ItemOrganization {
        item_id,
        organization_id,
        can_edit_claimed,
    }
}

fn row_to_item(
    (id, item_type, status, hidden, deleted_at, created_at): (i64, String, String, bool, Option<i64>, i64),
) -> Result<Item, DbError> {
    let status: ItemStatus = status
        .parse()
        .map_err(|e: registra_model::StatusParseError| DbError::CorruptRecord(e.to_string()))?;
    Ok(Item {
        id,
        item_type,
        status,
        hidden,
        deleted_at,
        created_at,
    })
}

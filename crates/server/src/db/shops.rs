//! Shop repository for database operations.
//!
//! Covers shop creation, the one-level branch hierarchy and the dashboard
//! aggregates.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use palengke_core::{ShopId, UserId};

use super::RepositoryError;
use crate::models::{Shop, ShopStats};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for shop queries.
#[derive(Debug, sqlx::FromRow)]
struct ShopRow {
    id: ShopId,
    name: String,
    description: Option<String>,
    owner_id: UserId,
    parent_shop_id: Option<ShopId>,
    created_at: DateTime<Utc>,
}

impl From<ShopRow> for Shop {
    fn from(row: ShopRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            owner_id: row.owner_id,
            parent_shop_id: row.parent_shop_id,
            created_at: row.created_at,
        }
    }
}

/// Internal row type for the dashboard aggregate query.
#[derive(Debug, sqlx::FromRow)]
struct StatsRow {
    item_count: i64,
    total_stock: i64,
    total_value_cents: i64,
}

const SHOP_COLUMNS: &str = "id, name, description, owner_id, parent_shop_id, created_at";

// =============================================================================
// Repository
// =============================================================================

/// Repository for shop database operations.
pub struct ShopRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ShopRepository<'a> {
    /// Create a new shop repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a shop, optionally as a branch of `parent`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the owner already has a
    /// top-level shop (partial unique index) and `parent` is `None`.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        owner: UserId,
        name: &str,
        description: Option<&str>,
        parent: Option<ShopId>,
    ) -> Result<Shop, RepositoryError> {
        let row = sqlx::query_as::<_, ShopRow>(&format!(
            "INSERT INTO shops (name, description, owner_id, parent_shop_id, created_at) \
             VALUES (?, ?, ?, ?, ?) \
             RETURNING {SHOP_COLUMNS}"
        ))
        .bind(name)
        .bind(description)
        .bind(owner)
        .bind(parent)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("owner already has a shop".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(row.into())
    }

    /// Get a shop by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ShopId) -> Result<Option<Shop>, RepositoryError> {
        let row = sqlx::query_as::<_, ShopRow>(&format!(
            "SELECT {SHOP_COLUMNS} FROM shops WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Get an owner's top-level shop, if they have one.
    ///
    /// Branches do not count: "my shop" is always the shop without a parent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn primary_for_owner(&self, owner: UserId) -> Result<Option<Shop>, RepositoryError> {
        let row = sqlx::query_as::<_, ShopRow>(&format!(
            "SELECT {SHOP_COLUMNS} FROM shops \
             WHERE owner_id = ? AND parent_shop_id IS NULL \
             LIMIT 1"
        ))
        .bind(owner)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// List the direct sub-locations of a shop.
    ///
    /// One level only; descendants of branches are not included.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn sub_locations(&self, shop_id: ShopId) -> Result<Vec<Shop>, RepositoryError> {
        let rows = sqlx::query_as::<_, ShopRow>(&format!(
            "SELECT {SHOP_COLUMNS} FROM shops \
             WHERE parent_shop_id = ? \
             ORDER BY id ASC"
        ))
        .bind(shop_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// The parent of a shop, if it is a branch.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the shop doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn parent_of(&self, shop_id: ShopId) -> Result<Option<ShopId>, RepositoryError> {
        let row = sqlx::query_as::<_, (Option<ShopId>,)>(
            "SELECT parent_shop_id FROM shops WHERE id = ?",
        )
        .bind(shop_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(|(parent,)| parent).ok_or(RepositoryError::NotFound)
    }

    /// Update a shop's name and description.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the shop doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        shop_id: ShopId,
        name: &str,
        description: Option<&str>,
    ) -> Result<Shop, RepositoryError> {
        let row = sqlx::query_as::<_, ShopRow>(&format!(
            "UPDATE shops SET name = ?, description = ? \
             WHERE id = ? \
             RETURNING {SHOP_COLUMNS}"
        ))
        .bind(name)
        .bind(description)
        .bind(shop_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Make a shop a branch of `parent`.
    ///
    /// Cycle prevention is the caller's job; the schema alone does not stop
    /// a parent chain from looping back on itself.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the shop doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_parent(&self, shop_id: ShopId, parent: ShopId) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE shops SET parent_shop_id = ? WHERE id = ?")
            .bind(parent)
            .bind(shop_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Dashboard aggregates for one shop.
    ///
    /// A shop with no items yields all-zero aggregates, not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn stats(&self, shop_id: ShopId) -> Result<ShopStats, RepositoryError> {
        let row = sqlx::query_as::<_, StatsRow>(
            "SELECT COUNT(*) AS item_count, \
                    COALESCE(SUM(stock), 0) AS total_stock, \
                    COALESCE(SUM(price_cents * stock), 0) AS total_value_cents \
             FROM items WHERE shop_id = ?",
        )
        .bind(shop_id)
        .fetch_one(self.pool)
        .await?;

        Ok(ShopStats {
            item_count: row.item_count,
            total_stock: row.total_stock,
            total_value: Decimal::new(row.total_value_cents, 2),
        })
    }
}

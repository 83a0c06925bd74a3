//! Item repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use palengke_core::{CategoryId, ItemId, Price, ShopId, UserId};

use super::RepositoryError;
use crate::models::Item;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for item queries.
#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    id: ItemId,
    name: String,
    description: Option<String>,
    price_cents: i64,
    stock: i64,
    img_url: Option<String>,
    shop_id: ShopId,
    category_id: CategoryId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ItemRow> for Item {
    type Error = RepositoryError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        let price = Price::from_cents(row.price_cents).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price,
            stock: row.stock,
            img_url: row.img_url,
            shop_id: row.shop_id,
            category_id: row.category_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const ITEM_COLUMNS: &str = "id, name, description, price_cents, stock, img_url, shop_id, \
     category_id, created_at, updated_at";

/// Value fields written by item create and update.
#[derive(Debug, Clone)]
pub struct ItemRecord<'r> {
    pub name: &'r str,
    pub description: Option<&'r str>,
    pub price: Price,
    pub stock: i64,
    pub category_id: CategoryId,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for item database operations.
pub struct ItemRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ItemRepository<'a> {
    /// Create a new item repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create an item in a shop.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored row is invalid.
    pub async fn create(
        &self,
        shop_id: ShopId,
        record: &ItemRecord<'_>,
    ) -> Result<Item, RepositoryError> {
        let now = Utc::now();

        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "INSERT INTO items \
                 (name, description, price_cents, stock, shop_id, category_id, \
                  created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {ITEM_COLUMNS}"
        ))
        .bind(record.name)
        .bind(record.description)
        .bind(record.price.as_cents())
        .bind(record.stock)
        .bind(shop_id)
        .bind(record.category_id)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Get an item by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored row is invalid.
    pub async fn get_by_id(&self, id: ItemId) -> Result<Option<Item>, RepositoryError> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// List all items in a shop.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored row is invalid.
    pub async fn list_by_shop(&self, shop_id: ShopId) -> Result<Vec<Item>, RepositoryError> {
        let rows = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE shop_id = ? ORDER BY id ASC"
        ))
        .bind(shop_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// The owner of the shop an item belongs to.
    ///
    /// Returns `None` if the item doesn't exist. Used by the ownership guard
    /// before any item mutation.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn owner_of(&self, id: ItemId) -> Result<Option<UserId>, RepositoryError> {
        let row = sqlx::query_as::<_, (UserId,)>(
            "SELECT s.owner_id FROM items i \
             JOIN shops s ON s.id = i.shop_id \
             WHERE i.id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|(owner,)| owner))
    }

    /// Update an item's fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ItemId,
        record: &ItemRecord<'_>,
    ) -> Result<Item, RepositoryError> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "UPDATE items \
             SET name = ?, description = ?, price_cents = ?, stock = ?, \
                 category_id = ?, updated_at = ? \
             WHERE id = ? \
             RETURNING {ITEM_COLUMNS}"
        ))
        .bind(record.name)
        .bind(record.description)
        .bind(record.price.as_cents())
        .bind(record.stock)
        .bind(record.category_id)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into)
            .transpose()?
            .ok_or(RepositoryError::NotFound)
    }

    /// Set an item's image path.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_image(&self, id: ItemId, img_url: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE items SET img_url = ?, updated_at = ? WHERE id = ?")
            .bind(img_url)
            .bind(Utc::now())
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete an item.
    ///
    /// # Returns
    ///
    /// Returns `true` if the item was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: ItemId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

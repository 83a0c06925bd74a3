//! Item domain types.

use chrono::{DateTime, Utc};

use palengke_core::{CategoryId, CategoryName, ItemId, Price, ShopId};

/// An item listed in a shop (domain type).
#[derive(Debug, Clone)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: Option<String>,
    pub price: Price,
    pub stock: i64,
    /// Relative path of the stored product image, if one was uploaded.
    pub img_url: Option<String>,
    pub shop_id: ShopId,
    pub category_id: CategoryId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for listing a new item.
///
/// The category carries the canonical name; the normalizer resolves it to a
/// category row when the item is persisted.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub description: Option<String>,
    pub price: Price,
    pub stock: i64,
    pub category: CategoryName,
}

/// Fields for editing an existing item.
#[derive(Debug, Clone)]
pub struct ItemUpdate {
    pub name: String,
    pub description: Option<String>,
    pub price: Price,
    pub stock: i64,
    pub category: CategoryName,
}

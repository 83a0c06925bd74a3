//! Shop domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use palengke_core::{ShopId, UserId};

/// A shop (domain type).
///
/// A shop with `parent_shop_id` set is a branch (sub-location) of the
/// parent shop.
#[derive(Debug, Clone)]
pub struct Shop {
    pub id: ShopId,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: UserId,
    pub parent_shop_id: Option<ShopId>,
    pub created_at: DateTime<Utc>,
}

impl Shop {
    /// Whether this shop is a branch of another shop.
    #[must_use]
    pub const fn is_branch(&self) -> bool {
        self.parent_shop_id.is_some()
    }
}

/// Fields for creating a shop.
#[derive(Debug, Clone)]
pub struct NewShop {
    pub name: String,
    pub description: Option<String>,
}

/// Fields for editing a shop.
#[derive(Debug, Clone)]
pub struct ShopUpdate {
    pub name: String,
    pub description: Option<String>,
}

/// Dashboard aggregates for a single shop.
///
/// All values are zero for a shop without items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopStats {
    /// Number of items listed in the shop.
    pub item_count: i64,
    /// Sum of stock across the shop's items.
    pub total_stock: i64,
    /// Sum of price x stock across the shop's items.
    pub total_value: Decimal,
}

impl ShopStats {
    /// Aggregates for a shop with no items.
    pub const EMPTY: Self = Self {
        item_count: 0,
        total_stock: 0,
        total_value: Decimal::ZERO,
    };
}

//! Shop and inventory service.
//!
//! All mutations run the ownership guard first: the acting user must own the
//! shop the target belongs to, or the operation fails with
//! [`ShopError::NotOwner`] before any write is issued.

mod error;

pub use error::ShopError;

use sqlx::SqlitePool;

use palengke_core::{ItemId, ShopId, UserId};

use crate::db::RepositoryError;
use crate::db::categories::CategoryRepository;
use crate::db::items::{ItemRecord, ItemRepository};
use crate::db::shops::ShopRepository;
use crate::models::{Item, ItemUpdate, NewItem, NewShop, Shop, ShopStats, ShopUpdate};

/// Maximum supported depth of the branch hierarchy.
///
/// The ancestor walk in [`ShopService::attach_branch`] stops here, so a
/// corrupted parent chain cannot loop forever.
pub const MAX_BRANCH_DEPTH: usize = 8;

/// Shop and inventory service.
pub struct ShopService<'a> {
    shops: ShopRepository<'a>,
    items: ItemRepository<'a>,
    categories: CategoryRepository<'a>,
}

impl<'a> ShopService<'a> {
    /// Create a new shop service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            shops: ShopRepository::new(pool),
            items: ItemRepository::new(pool),
            categories: CategoryRepository::new(pool),
        }
    }

    // =========================================================================
    // Shops
    // =========================================================================

    /// Create the acting user's shop.
    ///
    /// Each user gets at most one top-level shop. The check-then-insert race
    /// is closed by a partial unique index on `shops.owner_id`.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::AlreadyHasShop` if the user already has a shop.
    /// Returns `ShopError::Validation` if the name is empty.
    pub async fn create_shop(&self, acting: UserId, new_shop: NewShop) -> Result<Shop, ShopError> {
        let name = validated_name(&new_shop.name)?;

        if self.shops.primary_for_owner(acting).await?.is_some() {
            return Err(ShopError::AlreadyHasShop);
        }

        self.shops
            .create(acting, name, new_shop.description.as_deref(), None)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => ShopError::AlreadyHasShop,
                other => other.into(),
            })
    }

    /// The acting user's shop.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::NoShop` if the user hasn't created one.
    pub async fn my_shop(&self, acting: UserId) -> Result<Shop, ShopError> {
        self.shops
            .primary_for_owner(acting)
            .await?
            .ok_or(ShopError::NoShop)
    }

    /// The acting user's shop together with its items.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::NoShop` if the user hasn't created one.
    pub async fn shop_overview(&self, acting: UserId) -> Result<(Shop, Vec<Item>), ShopError> {
        let shop = self.my_shop(acting).await?;
        let items = self.items.list_by_shop(shop.id).await?;
        Ok((shop, items))
    }

    /// Edit the acting user's shop.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::NoShop` if the user hasn't created one.
    /// Returns `ShopError::NotOwner` if the shop isn't theirs.
    pub async fn update_shop(&self, acting: UserId, update: ShopUpdate) -> Result<Shop, ShopError> {
        let name = validated_name(&update.name)?;

        let shop = self.my_shop(acting).await?;
        ensure_shop_owner(acting, &shop)?;

        Ok(self
            .shops
            .update(shop.id, name, update.description.as_deref())
            .await?)
    }

    /// Create a branch (sub-location) of the acting user's shop.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::NoShop` if the user has no shop to branch.
    /// Returns `ShopError::Validation` if the name is empty.
    pub async fn create_branch(&self, acting: UserId, branch: NewShop) -> Result<Shop, ShopError> {
        let name = validated_name(&branch.name)?;

        let parent = self.my_shop(acting).await?;

        Ok(self
            .shops
            .create(acting, name, branch.description.as_deref(), Some(parent.id))
            .await?)
    }

    /// Make an existing shop a branch of another shop.
    ///
    /// Both shops must belong to the acting user. The parent chain is walked
    /// upward before the write: a shop may not become its own parent or a
    /// branch of one of its descendants, and the chain may not exceed
    /// [`MAX_BRANCH_DEPTH`].
    ///
    /// # Errors
    ///
    /// Returns `ShopError::NotFound` if either shop doesn't exist.
    /// Returns `ShopError::NotOwner` if either shop isn't the acting user's.
    /// Returns `ShopError::BranchCycle` if the re-parenting would loop.
    pub async fn attach_branch(
        &self,
        acting: UserId,
        shop_id: ShopId,
        parent_id: ShopId,
    ) -> Result<(), ShopError> {
        if shop_id == parent_id {
            return Err(ShopError::BranchCycle);
        }

        let shop = self.shops.get_by_id(shop_id).await?.ok_or(ShopError::NotFound)?;
        let parent = self
            .shops
            .get_by_id(parent_id)
            .await?
            .ok_or(ShopError::NotFound)?;

        ensure_shop_owner(acting, &shop)?;
        ensure_shop_owner(acting, &parent)?;

        // Walk the new parent's ancestor chain; if it passes through the
        // shop being attached, the hierarchy would loop.
        let mut cursor = parent.parent_shop_id;
        for _ in 0..MAX_BRANCH_DEPTH {
            let Some(ancestor) = cursor else {
                break;
            };
            if ancestor == shop_id {
                return Err(ShopError::BranchCycle);
            }
            cursor = self.shops.parent_of(ancestor).await?;
        }
        if cursor.is_some() {
            return Err(ShopError::BranchTooDeep {
                max: MAX_BRANCH_DEPTH,
            });
        }

        Ok(self.shops.set_parent(shop_id, parent_id).await?)
    }

    /// List the direct sub-locations of a shop.
    ///
    /// One level of children only, matching the hierarchy's current scope.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::NotFound` if the shop doesn't exist.
    pub async fn sub_locations(&self, shop_id: ShopId) -> Result<Vec<Shop>, ShopError> {
        if self.shops.get_by_id(shop_id).await?.is_none() {
            return Err(ShopError::NotFound);
        }

        Ok(self.shops.sub_locations(shop_id).await?)
    }

    /// Dashboard view: the acting user's shop and its aggregates.
    ///
    /// A shop without items reports all-zero aggregates.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::NoShop` if the user hasn't created a shop.
    pub async fn dashboard(&self, acting: UserId) -> Result<(Shop, ShopStats), ShopError> {
        let shop = self.my_shop(acting).await?;
        let stats = self.shops.stats(shop.id).await?;
        Ok((shop, stats))
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// List a new item in the acting user's shop.
    ///
    /// The category string was already canonicalized; here it is resolved to
    /// a category row, creating one if this canonical name is new.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::NoShop` if the user hasn't created a shop.
    /// Returns `ShopError::Validation` for an empty name or negative stock.
    pub async fn add_item(&self, acting: UserId, new_item: NewItem) -> Result<Item, ShopError> {
        let name = validated_name(&new_item.name)?;
        validate_stock(new_item.stock)?;

        let shop = self.my_shop(acting).await?;
        let category = self.categories.get_or_create(&new_item.category).await?;

        Ok(self
            .items
            .create(
                shop.id,
                &ItemRecord {
                    name,
                    description: new_item.description.as_deref(),
                    price: new_item.price,
                    stock: new_item.stock,
                    category_id: category.id,
                },
            )
            .await?)
    }

    /// Edit an item.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::NotFound` if the item doesn't exist.
    /// Returns `ShopError::NotOwner` if the item's shop isn't the acting user's.
    /// Returns `ShopError::Validation` for an empty name or negative stock.
    pub async fn update_item(
        &self,
        acting: UserId,
        item_id: ItemId,
        update: ItemUpdate,
    ) -> Result<Item, ShopError> {
        let name = validated_name(&update.name)?;
        validate_stock(update.stock)?;

        self.authorize_item(acting, item_id).await?;

        let category = self.categories.get_or_create(&update.category).await?;

        Ok(self
            .items
            .update(
                item_id,
                &ItemRecord {
                    name,
                    description: update.description.as_deref(),
                    price: update.price,
                    stock: update.stock,
                    category_id: category.id,
                },
            )
            .await?)
    }

    /// Delete an item. Deletion is immediate; there is no soft-delete.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::NotFound` if the item doesn't exist.
    /// Returns `ShopError::NotOwner` if the item's shop isn't the acting user's.
    pub async fn delete_item(&self, acting: UserId, item_id: ItemId) -> Result<(), ShopError> {
        self.authorize_item(acting, item_id).await?;

        if !self.items.delete(item_id).await? {
            return Err(ShopError::NotFound);
        }

        Ok(())
    }

    /// Set an item's image path to an already-stored file.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::NotFound` if the item doesn't exist.
    /// Returns `ShopError::NotOwner` if the item's shop isn't the acting user's.
    pub async fn set_item_image(
        &self,
        acting: UserId,
        item_id: ItemId,
        img_url: &str,
    ) -> Result<Item, ShopError> {
        self.authorize_item(acting, item_id).await?;

        self.items.set_image(item_id, img_url).await?;
        self.items
            .get_by_id(item_id)
            .await?
            .ok_or(ShopError::NotFound)
    }

    /// Ownership guard for item mutations.
    ///
    /// Runs strictly before any write: resolves the owner of the item's shop
    /// and compares it against the acting user.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::NotFound` if the item doesn't exist.
    /// Returns `ShopError::NotOwner` on owner mismatch.
    pub async fn authorize_item(&self, acting: UserId, item_id: ItemId) -> Result<(), ShopError> {
        let owner = self
            .items
            .owner_of(item_id)
            .await?
            .ok_or(ShopError::NotFound)?;

        if owner != acting {
            return Err(ShopError::NotOwner);
        }

        Ok(())
    }
}

/// Ownership guard for shop mutations.
fn ensure_shop_owner(acting: UserId, shop: &Shop) -> Result<(), ShopError> {
    if shop.owner_id != acting {
        return Err(ShopError::NotOwner);
    }
    Ok(())
}

/// Reject empty names before any write.
fn validated_name(name: &str) -> Result<&str, ShopError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ShopError::Validation("name is required".to_owned()));
    }
    Ok(trimmed)
}

/// Reject negative stock before any write.
fn validate_stock(stock: i64) -> Result<(), ShopError> {
    if stock < 0 {
        return Err(ShopError::Validation(
            "stock must not be negative".to_owned(),
        ));
    }
    Ok(())
}

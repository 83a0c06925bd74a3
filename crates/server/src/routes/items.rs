//! Item route handlers.
//!
//! Item mutations run through the shop service's ownership guard; an edit or
//! delete against somebody else's item fails with 403 before any write.

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use palengke_core::{CategoryId, CategoryName, ItemId, Price, ShopId};

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{Item, ItemUpdate, NewItem};
use crate::routes::profile::read_image_field;
use crate::services::images::ImageKind;
use crate::services::shop::ShopService;
use crate::state::AppState;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Item create/edit request body.
///
/// The category arrives as free text; it is canonicalized before it reaches
/// the service.
#[derive(Debug, Deserialize)]
pub struct ItemRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i64,
    pub category: String,
}

impl ItemRequest {
    /// Validate the raw body into domain values.
    fn price(&self) -> Result<Price> {
        Price::new(self.price).map_err(|e| AppError::BadRequest(e.to_string()))
    }

    fn category(&self) -> Result<CategoryName> {
        CategoryName::canonicalize(&self.category).map_err(|e| AppError::BadRequest(e.to_string()))
    }
}

/// An item as exposed over the API.
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: ItemId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i64,
    pub img_url: Option<String>,
    pub shop_id: ShopId,
    pub category_id: CategoryId,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            price: item.price.amount(),
            stock: item.stock,
            img_url: item.img_url,
            shop_id: item.shop_id,
            category_id: item.category_id,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Add an item to the acting user's shop.
///
/// # Errors
///
/// Returns 400 for invalid price, stock, or category and 404 if the user
/// hasn't created a shop.
pub async fn create(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<ItemRequest>,
) -> Result<(StatusCode, Json<ItemResponse>)> {
    let new_item = NewItem {
        price: body.price()?,
        category: body.category()?,
        name: body.name,
        description: body.description,
        stock: body.stock,
    };

    let service = ShopService::new(state.pool());
    let item = service.add_item(current.id, new_item).await?;

    tracing::info!(item_id = %item.id, shop_id = %item.shop_id, "item listed");

    Ok((StatusCode::CREATED, Json(item.into())))
}

/// Edit an item.
///
/// # Errors
///
/// Returns 403 if the acting user doesn't own the item's shop and 404 if the
/// item doesn't exist.
pub async fn update(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<ItemRequest>,
) -> Result<Json<ItemResponse>> {
    let update = ItemUpdate {
        price: body.price()?,
        category: body.category()?,
        name: body.name,
        description: body.description,
        stock: body.stock,
    };

    let service = ShopService::new(state.pool());
    let item = service
        .update_item(current.id, ItemId::new(id), update)
        .await?;

    Ok(Json(item.into()))
}

/// Delete an item.
///
/// # Errors
///
/// Returns 403 if the acting user doesn't own the item's shop and 404 if the
/// item doesn't exist.
pub async fn delete(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    let service = ShopService::new(state.pool());
    service.delete_item(current.id, ItemId::new(id)).await?;

    tracing::info!(item_id = id, "item deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Upload an item image.
///
/// The ownership guard runs before the file is written, and the file is
/// written before the item row is touched; a failed write aborts the update.
///
/// # Errors
///
/// Returns 403 for somebody else's item, 404 for an unknown item, and 400
/// for an unusable upload.
pub async fn upload_image(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<ItemResponse>> {
    let item_id = ItemId::new(id);

    let service = ShopService::new(state.pool());
    service.authorize_item(current.id, item_id).await?;

    let (filename, bytes) = read_image_field(multipart).await?;
    let img_url = state
        .images()
        .save(ImageKind::Product, &filename, &bytes)
        .await?;

    let item = service
        .set_item_image(current.id, item_id, &img_url)
        .await?;

    Ok(Json(item.into()))
}

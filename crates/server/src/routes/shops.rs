//! Shop route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use palengke_core::ShopId;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::{NewShop, Shop, ShopUpdate};
use crate::routes::items::ItemResponse;
use crate::services::shop::ShopService;
use crate::state::AppState;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Shop create/edit request body.
#[derive(Debug, Deserialize)]
pub struct ShopRequest {
    pub name: String,
    pub description: Option<String>,
}

/// A shop as exposed over the API.
#[derive(Debug, Serialize)]
pub struct ShopResponse {
    pub id: ShopId,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: palengke_core::UserId,
    pub parent_shop_id: Option<ShopId>,
}

impl From<Shop> for ShopResponse {
    fn from(shop: Shop) -> Self {
        Self {
            id: shop.id,
            name: shop.name,
            description: shop.description,
            owner_id: shop.owner_id,
            parent_shop_id: shop.parent_shop_id,
        }
    }
}

/// My-shop view: the shop and its items.
#[derive(Debug, Serialize)]
pub struct ShopOverviewResponse {
    pub shop: ShopResponse,
    pub items: Vec<ItemResponse>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Create the acting user's shop.
///
/// # Errors
///
/// Returns 409 if the user already has a shop.
pub async fn create(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<ShopRequest>,
) -> Result<(StatusCode, Json<ShopResponse>)> {
    let service = ShopService::new(state.pool());
    let shop = service
        .create_shop(
            current.id,
            NewShop {
                name: body.name,
                description: body.description,
            },
        )
        .await?;

    tracing::info!(shop_id = %shop.id, owner_id = %current.id, "shop created");

    Ok((StatusCode::CREATED, Json(shop.into())))
}

/// Display the acting user's shop and its items.
///
/// # Errors
///
/// Returns 404 if the user hasn't created a shop.
pub async fn my_shop(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<ShopOverviewResponse>> {
    let service = ShopService::new(state.pool());
    let (shop, items) = service.shop_overview(current.id).await?;

    Ok(Json(ShopOverviewResponse {
        shop: shop.into(),
        items: items.into_iter().map(Into::into).collect(),
    }))
}

/// Edit the acting user's shop.
///
/// # Errors
///
/// Returns 404 if the user hasn't created a shop.
pub async fn update(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<ShopRequest>,
) -> Result<Json<ShopResponse>> {
    let service = ShopService::new(state.pool());
    let shop = service
        .update_shop(
            current.id,
            ShopUpdate {
                name: body.name,
                description: body.description,
            },
        )
        .await?;

    Ok(Json(shop.into()))
}

/// List the acting user's shop's sub-locations.
///
/// # Errors
///
/// Returns 404 if the user hasn't created a shop.
pub async fn my_branches(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<ShopResponse>>> {
    let service = ShopService::new(state.pool());
    let shop = service.my_shop(current.id).await?;
    let branches = service.sub_locations(shop.id).await?;

    Ok(Json(branches.into_iter().map(Into::into).collect()))
}

/// Create a branch of the acting user's shop.
///
/// # Errors
///
/// Returns 404 if the user hasn't created a shop.
pub async fn create_branch(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<ShopRequest>,
) -> Result<(StatusCode, Json<ShopResponse>)> {
    let service = ShopService::new(state.pool());
    let branch = service
        .create_branch(
            current.id,
            NewShop {
                name: body.name,
                description: body.description,
            },
        )
        .await?;

    tracing::info!(shop_id = %branch.id, "branch created");

    Ok((StatusCode::CREATED, Json(branch.into())))
}

/// List the sub-locations of any shop. Public: one level of children only.
///
/// # Errors
///
/// Returns 404 if the shop doesn't exist.
pub async fn branches(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<ShopResponse>>> {
    let service = ShopService::new(state.pool());
    let branches = service.sub_locations(ShopId::new(id)).await?;

    Ok(Json(branches.into_iter().map(Into::into).collect()))
}

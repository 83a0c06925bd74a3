//! Dashboard route handler.
//!
//! Aggregates are computed per request; the data set is small enough that no
//! caching is needed.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::routes::shops::ShopResponse;
use crate::services::shop::ShopService;
use crate::state::AppState;

/// Dashboard view: the shop and its inventory aggregates.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub shop: ShopResponse,
    pub item_count: i64,
    pub total_stock: i64,
    pub total_value: Decimal,
}

/// Display the acting user's shop dashboard.
///
/// A shop with no items reports zero for every aggregate.
///
/// # Errors
///
/// Returns 404 if the user hasn't created a shop.
pub async fn show(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>> {
    let service = ShopService::new(state.pool());
    let (shop, stats) = service.dashboard(current.id).await?;

    Ok(Json(DashboardResponse {
        shop: shop.into(),
        item_count: stats.item_count,
        total_stock: stats.total_stock,
        total_value: stats.total_value,
    }))
}

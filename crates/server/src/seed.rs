//! Demo data bootstrapper.
//!
//! Populates one demo user with an address, a shop with one branch, and a
//! few categorized items. Runs once at server start; every step checks for
//! existing data first, so re-running is a no-op.

use sqlx::SqlitePool;
use thiserror::Error;

use palengke_core::{CategoryName, Price, Username};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::{AddressUpdate, NewItem, NewShop, ProfileUpdate, User};
use crate::services::auth::{AuthError, AuthService};
use crate::services::shop::{ShopError, ShopService};

/// Username of the seeded demo account.
pub const DEMO_USERNAME: &str = "demo_artisan";

/// Password of the seeded demo account, for local exploration only.
pub const DEMO_PASSWORD: &str = "bayanihan-kiln-1952";

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("shop error: {0}")]
    Shop(#[from] ShopError),

    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("invalid seed data: {0}")]
    InvalidData(String),
}

/// Seed the demo user, shop, branch, and items.
///
/// Idempotent: each step is skipped when its data already exists.
///
/// # Errors
///
/// Returns `SeedError` if any database operation fails.
pub async fn seed_demo_data(pool: &SqlitePool) -> Result<(), SeedError> {
    let user = ensure_demo_user(pool).await?;
    ensure_demo_shop(pool, &user).await?;
    ensure_demo_items(pool, &user).await?;
    Ok(())
}

async fn ensure_demo_user(pool: &SqlitePool) -> Result<User, SeedError> {
    let users = UserRepository::new(pool);

    let username =
        Username::parse(DEMO_USERNAME).map_err(|e| SeedError::InvalidData(e.to_string()))?;

    if let Some(existing) = users.get_by_username(&username).await? {
        return Ok(existing);
    }

    let auth = AuthService::new(pool);
    let user = auth.register(DEMO_USERNAME, DEMO_PASSWORD).await?;
    users.set_admin(user.id, true).await?;

    let (user, _) = users
        .update_profile(
            user.id,
            &ProfileUpdate {
                first_name: Some("Zian".to_owned()),
                last_name: Some("Clay".to_owned()),
                contact_num: Some("000-000-0000".to_owned()),
                bio: Some("This is the demo artisan account.".to_owned()),
                address: Some(AddressUpdate {
                    street_address: "123 Demo St".to_owned(),
                    city: "Demo City".to_owned(),
                    province: "Demo Province".to_owned(),
                    zip_code: "00000".to_owned(),
                }),
                ..ProfileUpdate::default()
            },
        )
        .await?;

    tracing::info!(user_id = %user.id, "demo user created");

    Ok(user)
}

async fn ensure_demo_shop(pool: &SqlitePool, user: &User) -> Result<(), SeedError> {
    let shops = ShopService::new(pool);

    let shop = match shops.my_shop(user.id).await {
        Ok(existing) => existing,
        Err(ShopError::NoShop) => {
            let shop = shops
                .create_shop(
                    user.id,
                    NewShop {
                        name: "Zian Clay Works".to_owned(),
                        description: Some("The official demo shop.".to_owned()),
                    },
                )
                .await?;
            tracing::info!(shop_id = %shop.id, "demo shop created");
            shop
        }
        Err(e) => return Err(e.into()),
    };

    if shops.sub_locations(shop.id).await?.is_empty() {
        let branch = shops
            .create_branch(
                user.id,
                NewShop {
                    name: "Zian Clay Works - Weekend Market".to_owned(),
                    description: Some("Pop-up branch at the weekend market.".to_owned()),
                },
            )
            .await?;
        tracing::info!(shop_id = %branch.id, "demo branch created");
    }

    Ok(())
}

async fn ensure_demo_items(pool: &SqlitePool, user: &User) -> Result<(), SeedError> {
    let shops = ShopService::new(pool);

    let (shop, items) = shops.shop_overview(user.id).await?;
    if !items.is_empty() {
        return Ok(());
    }

    let demo_items: &[(&str, &str, i64, i64, &str)] = &[
        (
            "Handmade Wooden Bowl",
            "Carved from local mahogany.",
            35000,
            10,
            "woodwork",
        ),
        (
            "Woven Artisan Bag",
            "Eco-friendly handwoven bag.",
            120_000,
            5,
            "weaving",
        ),
        (
            "Ceramic Coffee Mug",
            "Hand-painted ceramic mug.",
            25000,
            20,
            "ceramics",
        ),
    ];

    for (name, description, price_cents, stock, category) in demo_items {
        let price =
            Price::from_cents(*price_cents).map_err(|e| SeedError::InvalidData(e.to_string()))?;
        let category = CategoryName::canonicalize(category)
            .map_err(|e| SeedError::InvalidData(e.to_string()))?;

        shops
            .add_item(
                user.id,
                NewItem {
                    name: (*name).to_owned(),
                    description: Some((*description).to_owned()),
                    price,
                    stock: *stock,
                    category,
                },
            )
            .await?;
    }

    tracing::info!(shop_id = %shop.id, count = demo_items.len(), "demo items seeded");

    Ok(())
}

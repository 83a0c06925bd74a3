#![allow(clippy::unwrap_used)]

//! Integration tests for the one-shop cap and the ownership guard.

use palengke_core::{CategoryName, ItemId, Price};
use palengke_integration_tests::{count_rows, create_shop, register_user, test_pool};
use palengke_server::models::{ItemUpdate, NewItem, NewShop};
use palengke_server::services::shop::{ShopError, ShopService};
use rust_decimal::Decimal;

fn new_item(name: &str, price: i64, stock: i64, category: &str) -> NewItem {
    NewItem {
        name: name.to_owned(),
        description: None,
        price: Price::new(Decimal::from(price)).unwrap(),
        stock,
        category: CategoryName::canonicalize(category).unwrap(),
    }
}

#[tokio::test]
async fn second_shop_is_rejected() {
    let pool = test_pool().await;
    let user = register_user(&pool, "sari_sari").await;
    create_shop(&pool, &user, "First Shop").await;

    let service = ShopService::new(&pool);
    let result = service
        .create_shop(
            user.id,
            NewShop {
                name: "Second Shop".to_owned(),
                description: None,
            },
        )
        .await;

    assert!(matches!(result, Err(ShopError::AlreadyHasShop)));

    let shops = count_rows(&pool, "SELECT COUNT(*) FROM shops").await;
    assert_eq!(shops, 1, "the shop count must stay at one");
}

#[tokio::test]
async fn deleting_someone_elses_item_is_forbidden() {
    let pool = test_pool().await;
    let owner = register_user(&pool, "owner_user").await;
    let intruder = register_user(&pool, "intruder_user").await;
    create_shop(&pool, &owner, "Owner Shop").await;

    let service = ShopService::new(&pool);
    let item = service
        .add_item(owner.id, new_item("Clay Pot", 150, 3, "ceramics"))
        .await
        .unwrap();

    let result = service.delete_item(intruder.id, item.id).await;
    assert!(matches!(result, Err(ShopError::NotOwner)));

    // The item is untouched
    let items = count_rows(&pool, "SELECT COUNT(*) FROM items").await;
    assert_eq!(items, 1);
}

#[tokio::test]
async fn editing_someone_elses_item_is_forbidden() {
    let pool = test_pool().await;
    let owner = register_user(&pool, "owner_user").await;
    let intruder = register_user(&pool, "intruder_user").await;
    create_shop(&pool, &owner, "Owner Shop").await;

    let service = ShopService::new(&pool);
    let item = service
        .add_item(owner.id, new_item("Clay Pot", 150, 3, "ceramics"))
        .await
        .unwrap();

    let result = service
        .update_item(
            intruder.id,
            item.id,
            ItemUpdate {
                name: "Hijacked".to_owned(),
                description: None,
                price: Price::new(Decimal::from(1)).unwrap(),
                stock: 0,
                category: CategoryName::canonicalize("junk").unwrap(),
            },
        )
        .await;
    assert!(matches!(result, Err(ShopError::NotOwner)));

    // No write happened: name and price are unchanged
    let unchanged = ShopService::new(&pool)
        .shop_overview(owner.id)
        .await
        .unwrap()
        .1
        .remove(0);
    assert_eq!(unchanged.name, "Clay Pot");
    assert_eq!(unchanged.price.amount(), Decimal::from(150));
    assert_eq!(unchanged.stock, 3);
}

#[tokio::test]
async fn owner_can_edit_and_delete() {
    let pool = test_pool().await;
    let owner = register_user(&pool, "owner_user").await;
    create_shop(&pool, &owner, "Owner Shop").await;

    let service = ShopService::new(&pool);
    let item = service
        .add_item(owner.id, new_item("Clay Pot", 150, 3, "ceramics"))
        .await
        .unwrap();

    let updated = service
        .update_item(
            owner.id,
            item.id,
            ItemUpdate {
                name: "Glazed Clay Pot".to_owned(),
                description: Some("Now glazed.".to_owned()),
                price: Price::new(Decimal::from(200)).unwrap(),
                stock: 5,
                category: CategoryName::canonicalize("ceramics").unwrap(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Glazed Clay Pot");
    assert_eq!(updated.stock, 5);

    service.delete_item(owner.id, item.id).await.unwrap();
    let items = count_rows(&pool, "SELECT COUNT(*) FROM items").await;
    assert_eq!(items, 0);
}

#[tokio::test]
async fn mutating_unknown_item_is_not_found() {
    let pool = test_pool().await;
    let user = register_user(&pool, "lone_user").await;
    create_shop(&pool, &user, "Lone Shop").await;

    let service = ShopService::new(&pool);
    let missing = ItemId::new(9999);

    assert!(matches!(
        service.delete_item(user.id, missing).await,
        Err(ShopError::NotFound)
    ));
    assert!(matches!(
        service
            .update_item(
                user.id,
                missing,
                ItemUpdate {
                    name: "Ghost".to_owned(),
                    description: None,
                    price: Price::new(Decimal::from(1)).unwrap(),
                    stock: 0,
                    category: CategoryName::canonicalize("ghosts").unwrap(),
                },
            )
            .await,
        Err(ShopError::NotFound)
    ));
}

#[tokio::test]
async fn negative_stock_is_rejected_before_write() {
    let pool = test_pool().await;
    let user = register_user(&pool, "lone_user").await;
    create_shop(&pool, &user, "Lone Shop").await;

    let service = ShopService::new(&pool);
    let result = service
        .add_item(user.id, new_item("Broken", 10, -1, "oops"))
        .await;

    assert!(matches!(result, Err(ShopError::Validation(_))));
    assert_eq!(count_rows(&pool, "SELECT COUNT(*) FROM items").await, 0);
    // The category must not be created either
    assert_eq!(count_rows(&pool, "SELECT COUNT(*) FROM categories").await, 0);
}

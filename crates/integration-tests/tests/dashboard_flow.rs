#![allow(clippy::unwrap_used)]

//! End-to-end flow: account, shop, inventory, dashboard aggregates.

use palengke_core::{CategoryName, Price};
use palengke_integration_tests::{count_rows, create_shop, register_user, test_pool};
use palengke_server::models::{NewItem, ShopStats};
use palengke_server::services::shop::ShopService;
use rust_decimal::Decimal;

#[tokio::test]
async fn empty_shop_reports_zero_aggregates() {
    let pool = test_pool().await;
    let user = register_user(&pool, "empty_hands").await;
    create_shop(&pool, &user, "Empty Shelves").await;

    let (_, stats) = ShopService::new(&pool).dashboard(user.id).await.unwrap();

    assert_eq!(stats, ShopStats::EMPTY);
}

#[tokio::test]
async fn alice_lists_a_mug_and_reads_the_dashboard() {
    let pool = test_pool().await;
    let alice = register_user(&pool, "alice").await;
    create_shop(&pool, &alice, "Alice Crafts").await;

    let service = ShopService::new(&pool);
    let mug = service
        .add_item(
            alice.id,
            NewItem {
                name: "Mug".to_owned(),
                description: None,
                price: Price::new(Decimal::from(100)).unwrap(),
                stock: 5,
                category: CategoryName::canonicalize("ceramics ").unwrap(),
            },
        )
        .await
        .unwrap();

    let (shop, stats) = service.dashboard(alice.id).await.unwrap();
    assert_eq!(shop.name, "Alice Crafts");
    assert_eq!(stats.item_count, 1);
    assert_eq!(stats.total_stock, 5);
    assert_eq!(stats.total_value, Decimal::from(500));

    // Exactly one category, with the canonical name
    let categories = count_rows(&pool, "SELECT COUNT(*) FROM categories").await;
    assert_eq!(categories, 1);
    let name: String = sqlx::query_scalar("SELECT name FROM categories WHERE id = ?")
        .bind(mug.category_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(name, "Ceramics");
}

#[tokio::test]
async fn exact_case_category_reuses_the_row() {
    let pool = test_pool().await;
    let alice = register_user(&pool, "alice").await;
    create_shop(&pool, &alice, "Alice Crafts").await;

    let service = ShopService::new(&pool);
    let mug = service
        .add_item(
            alice.id,
            NewItem {
                name: "Mug".to_owned(),
                description: None,
                price: Price::new(Decimal::from(100)).unwrap(),
                stock: 5,
                category: CategoryName::canonicalize("ceramics ").unwrap(),
            },
        )
        .await
        .unwrap();

    let vase = service
        .add_item(
            alice.id,
            NewItem {
                name: "Vase".to_owned(),
                description: None,
                price: Price::new(Decimal::from(250)).unwrap(),
                stock: 2,
                category: CategoryName::canonicalize("Ceramics").unwrap(),
            },
        )
        .await
        .unwrap();

    assert_eq!(mug.category_id, vase.category_id);
    assert_eq!(count_rows(&pool, "SELECT COUNT(*) FROM categories").await, 1);

    let (_, stats) = service.dashboard(alice.id).await.unwrap();
    assert_eq!(stats.item_count, 2);
    assert_eq!(stats.total_stock, 7);
    assert_eq!(stats.total_value, Decimal::from(1000));
}

#[tokio::test]
async fn aggregates_follow_edits_and_deletes() {
    let pool = test_pool().await;
    let user = register_user(&pool, "busy_bee").await;
    create_shop(&pool, &user, "Busy Shop").await;

    let service = ShopService::new(&pool);
    let item = service
        .add_item(
            user.id,
            NewItem {
                name: "Basket".to_owned(),
                description: None,
                price: Price::new(Decimal::new(9950, 2)).unwrap(), // 99.50
                stock: 4,
                category: CategoryName::canonicalize("weaving").unwrap(),
            },
        )
        .await
        .unwrap();

    let (_, stats) = service.dashboard(user.id).await.unwrap();
    assert_eq!(stats.total_value, Decimal::new(39800, 2)); // 99.50 * 4

    service.delete_item(user.id, item.id).await.unwrap();
    let (_, stats) = service.dashboard(user.id).await.unwrap();
    assert_eq!(stats.item_count, 0);
    assert_eq!(stats.total_value, Decimal::ZERO);
}

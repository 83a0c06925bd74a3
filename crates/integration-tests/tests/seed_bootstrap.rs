#![allow(clippy::unwrap_used)]

//! Integration tests for the demo-data seed bootstrapper.

use palengke_core::Username;
use palengke_integration_tests::{count_rows, test_pool};
use palengke_server::db::UserRepository;
use palengke_server::seed::{self, DEMO_PASSWORD, DEMO_USERNAME};
use palengke_server::services::auth::AuthService;

#[tokio::test]
async fn seed_populates_user_shop_branch_and_items() {
    let pool = test_pool().await;

    seed::seed_demo_data(&pool).await.unwrap();

    let users = UserRepository::new(&pool);
    let demo = users
        .get_by_username(&Username::parse(DEMO_USERNAME).unwrap())
        .await
        .unwrap()
        .expect("demo user exists");
    assert!(demo.is_admin);
    assert!(users.get_address(demo.id).await.unwrap().is_some());

    assert_eq!(count_rows(&pool, "SELECT COUNT(*) FROM shops").await, 2); // shop + branch
    assert_eq!(count_rows(&pool, "SELECT COUNT(*) FROM items").await, 3);
    assert_eq!(count_rows(&pool, "SELECT COUNT(*) FROM categories").await, 3);
}

#[tokio::test]
async fn seeding_twice_is_a_no_op() {
    let pool = test_pool().await;

    seed::seed_demo_data(&pool).await.unwrap();
    seed::seed_demo_data(&pool).await.unwrap();

    assert_eq!(count_rows(&pool, "SELECT COUNT(*) FROM users").await, 1);
    assert_eq!(count_rows(&pool, "SELECT COUNT(*) FROM addresses").await, 1);
    assert_eq!(count_rows(&pool, "SELECT COUNT(*) FROM shops").await, 2);
    assert_eq!(count_rows(&pool, "SELECT COUNT(*) FROM items").await, 3);
    assert_eq!(count_rows(&pool, "SELECT COUNT(*) FROM categories").await, 3);
}

#[tokio::test]
async fn demo_account_can_log_in() {
    let pool = test_pool().await;

    seed::seed_demo_data(&pool).await.unwrap();

    let user = AuthService::new(&pool)
        .login(DEMO_USERNAME, DEMO_PASSWORD)
        .await
        .expect("seeded credentials are valid");
    assert_eq!(user.username.as_str(), DEMO_USERNAME);
}

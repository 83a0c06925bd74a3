//! Integration tests for Palengke.
//!
//! Tests run against a fresh in-memory `SQLite` database per test, with the
//! schema applied through the server's embedded migrations. Services and
//! repositories are exercised directly; the acting user id is passed
//! explicitly, so no session machinery is involved.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p palengke-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use palengke_server::db::MIGRATOR;
use palengke_server::models::{NewShop, Shop, User};
use palengke_server::services::auth::AuthService;
use palengke_server::services::shop::ShopService;

/// Password used for every test account.
pub const TEST_PASSWORD: &str = "hunter2-hunter2";

/// Create a migrated in-memory database.
///
/// A single pooled connection keeps the in-memory database alive and shared
/// for the whole test.
///
/// # Panics
///
/// Panics if the pool cannot be created or migrations fail; either is a
/// test-environment defect.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid connection string")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .connect_with(options)
        .await
        .expect("failed to open in-memory database");

    MIGRATOR.run(&pool).await.expect("failed to run migrations");

    pool
}

/// Register a user with the shared test password.
///
/// # Panics
///
/// Panics if registration fails.
pub async fn register_user(pool: &SqlitePool, username: &str) -> User {
    AuthService::new(pool)
        .register(username, TEST_PASSWORD)
        .await
        .expect("failed to register test user")
}

/// Create a shop owned by `user`.
///
/// # Panics
///
/// Panics if shop creation fails.
pub async fn create_shop(pool: &SqlitePool, user: &User, name: &str) -> Shop {
    ShopService::new(pool)
        .create_shop(
            user.id,
            NewShop {
                name: name.to_owned(),
                description: None,
            },
        )
        .await
        .expect("failed to create test shop")
}

/// Run a `COUNT(*)` query and return the count.
///
/// # Panics
///
/// Panics if the query fails.
pub async fn count_rows(pool: &SqlitePool, sql: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(sql)
        .fetch_one(pool)
        .await
        .expect("count query failed")
}

//! Database operations for the marketplace `SQLite` store.
//!
//! ## Tables
//!
//! - `users` - Accounts and profile data (password hashes, never cleartext)
//! - `addresses` - One-to-one user addresses (cascade-deleted with the user)
//! - `shops` - Shops and their branch hierarchy (self-referential parent)
//! - `categories` - Canonical, append-only item categories
//! - `items` - Shop inventory
//! - `tower_sessions` - Session storage (created by the session store)
//!
//! All queries use the runtime sqlx API with `FromRow` row types that are
//! converted into domain types via `TryFrom`.
//!
//! # Migrations
//!
//! Migrations are embedded from `crates/server/migrations/` and run at
//! server start, or explicitly via:
//! ```bash
//! cargo run -p palengke-cli -- migrate
//! ```

pub mod categories;
pub mod items;
pub mod shops;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub use categories::CategoryRepository;
pub use items::ItemRepository;
pub use shops::ShopRepository;
pub use users::UserRepository;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// The database file is created if missing and foreign key enforcement is
/// switched on for every connection.
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

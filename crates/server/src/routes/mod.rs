//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (DB ping)
//!
//! # Auth
//! POST /auth/register          - Create an account
//! POST /auth/login             - Open a session
//! POST /auth/logout            - Clear the session
//!
//! # Profile (requires auth)
//! GET  /profile                - Current user and address
//! PUT  /profile                - Edit profile (address upsert)
//! POST /profile/image          - Upload profile image (multipart)
//!
//! # Shop (requires auth unless noted)
//! POST /shop                   - Create my shop (one per user)
//! GET  /shop                   - My shop and its items
//! PUT  /shop                   - Edit my shop
//! GET  /shop/branches          - My shop's sub-locations
//! POST /shop/branches          - Create a branch of my shop
//! GET  /shops/{id}/branches    - Sub-locations of any shop (public)
//!
//! # Items (requires auth)
//! POST   /items                - Add an item to my shop
//! PUT    /items/{id}           - Edit an item (owner only)
//! DELETE /items/{id}           - Delete an item (owner only)
//! POST   /items/{id}/image     - Upload item image (multipart, owner only)
//!
//! # Dashboard (requires auth)
//! GET  /dashboard              - My shop's aggregates
//! ```

pub mod auth;
pub mod dashboard;
pub mod items;
pub mod profile;
pub mod shops;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the profile routes router.
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(profile::show).put(profile::update))
        .route("/image", post(profile::upload_image))
}

/// Create the shop routes router.
pub fn shop_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(shops::my_shop).post(shops::create).put(shops::update),
        )
        .route(
            "/branches",
            get(shops::my_branches).post(shops::create_branch),
        )
}

/// Create the item routes router.
pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(items::create))
        .route("/{id}", put(items::update).delete(items::delete))
        .route("/{id}/image", post(items::upload_image))
}

/// Create all routes for the marketplace.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/profile", profile_routes())
        .nest("/shop", shop_routes())
        .nest("/items", item_routes())
        // Public branch listing for arbitrary shops
        .route("/shops/{id}/branches", get(shops::branches))
        .route("/dashboard", get(dashboard::show))
}

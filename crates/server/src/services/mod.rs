//! Business logic services.
//!
//! Services sit between route handlers and repositories. Every operation
//! takes the acting user id as an explicit parameter rather than reading
//! ambient session state, so the core logic is testable without a simulated
//! session.

pub mod auth;
pub mod images;
pub mod shop;

pub use auth::{AuthError, AuthService};
pub use images::{ImageError, ImageKind, ImageStore};
pub use shop::{ShopError, ShopService};

//! Shop service error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during shop and inventory operations.
#[derive(Debug, Error)]
pub enum ShopError {
    /// Malformed or out-of-range input.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The acting user has no shop yet.
    #[error("no shop for this user")]
    NoShop,

    /// The acting user already has a shop.
    #[error("user already has a shop")]
    AlreadyHasShop,

    /// Referenced shop or item does not exist.
    #[error("not found")]
    NotFound,

    /// The acting user does not own the target shop or item.
    #[error("not the owner of this resource")]
    NotOwner,

    /// Re-parenting would make the branch chain loop back on itself.
    #[error("branch hierarchy would form a cycle")]
    BranchCycle,

    /// The branch chain is deeper than the supported maximum.
    #[error("branch hierarchy exceeds maximum depth of {max}")]
    BranchTooDeep {
        /// Maximum supported depth.
        max: usize,
    },

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

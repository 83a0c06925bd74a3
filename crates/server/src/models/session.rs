//! Session-stored identity.

use serde::{Deserialize, Serialize};

use palengke_core::UserId;

/// Keys used for values stored in the session.
pub mod session_keys {
    /// The authenticated user, if any.
    pub const CURRENT_USER: &str = "current_user";
}

/// The authenticated user, as stored in the session cookie's backing row.
///
/// Core operations take the acting user id as an explicit parameter; this
/// type only exists at the session boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub username: String,
}

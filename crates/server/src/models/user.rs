//! User and address domain types.

use chrono::{DateTime, NaiveDate, Utc};

use palengke_core::{AddressId, UserId, Username};

/// A marketplace user (domain type).
///
/// Created at signup with only a username and password; the remaining
/// profile fields are filled in later through profile editing.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login handle, unique across all users.
    pub username: Username,
    /// Reserved flag; no handler currently branches on it.
    pub is_admin: bool,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub birthdate: Option<NaiveDate>,
    /// Contact number, `"N/A"` until the profile is edited.
    pub contact_num: String,
    pub bio: Option<String>,
    /// Relative path of the stored profile image, if one was uploaded.
    pub profile_img_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user's address (domain type).
///
/// One-to-one with [`User`]: created lazily on the first profile edit and
/// updated in place afterwards.
#[derive(Debug, Clone)]
pub struct Address {
    pub id: AddressId,
    pub user_id: UserId,
    pub street_address: String,
    pub city: String,
    pub province: String,
    pub zip_code: String,
}

/// Profile fields submitted by a profile edit.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub contact_num: Option<String>,
    pub bio: Option<String>,
    /// Address fields; when present the user's address row is upserted.
    pub address: Option<AddressUpdate>,
}

/// Address fields submitted by a profile edit.
#[derive(Debug, Clone)]
pub struct AddressUpdate {
    pub street_address: String,
    pub city: String,
    pub province: String,
    pub zip_code: String,
}

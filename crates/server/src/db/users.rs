//! User repository for database operations.
//!
//! Provides database access for users and their one-to-one addresses.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;

use palengke_core::{AddressId, UserId, Username};

use super::RepositoryError;
use crate::models::{Address, ProfileUpdate, User};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for user queries.
///
/// Carries the password hash so credential lookups can reuse it; the hash is
/// dropped when converting into the domain [`User`].
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: UserId,
    username: Username,
    password_hash: String,
    is_admin: bool,
    first_name: Option<String>,
    last_name: Option<String>,
    gender: Option<String>,
    birthdate: Option<NaiveDate>,
    contact_num: String,
    bio: Option<String>,
    profile_img_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            is_admin: row.is_admin,
            first_name: row.first_name,
            last_name: row.last_name,
            gender: row.gender,
            birthdate: row.birthdate,
            contact_num: row.contact_num,
            bio: row.bio,
            profile_img_url: row.profile_img_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Internal row type for address queries.
#[derive(Debug, sqlx::FromRow)]
struct AddressRow {
    id: AddressId,
    user_id: UserId,
    street_address: String,
    city: String,
    province: String,
    zip_code: String,
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            street_address: row.street_address,
            city: row.city,
            province: row.province,
            zip_code: row.zip_code,
        }
    }
}

const USER_COLUMNS: &str = "id, username, password_hash, is_admin, first_name, last_name, \
     gender, birthdate, contact_num, bio, profile_img_url, created_at, updated_at";

// =============================================================================
// Repository
// =============================================================================

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user with username and password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let now = Utc::now();

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (username, password_hash, created_at, updated_at) \
             VALUES (?, ?, ?, ?) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(username)
        .bind(password_hash)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("username already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(row.into())
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Get a user by their username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Get a user and their password hash by username.
    ///
    /// Returns `None` if the user doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash(
        &self,
        username: &Username,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| {
            let hash = r.password_hash.clone();
            (r.into(), hash)
        }))
    }

    /// Update a user's profile fields and upsert their address.
    ///
    /// Both writes run inside a single transaction: a crash between them
    /// cannot leave the profile updated without the address, and two
    /// successive edits leave exactly one address row with the last edit's
    /// values.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_profile(
        &self,
        user_id: UserId,
        update: &ProfileUpdate,
    ) -> Result<(User, Option<Address>), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users \
             SET first_name = ?, last_name = ?, gender = ?, birthdate = ?, \
                 contact_num = COALESCE(?, contact_num), bio = ?, updated_at = ? \
             WHERE id = ? \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(update.first_name.as_deref())
        .bind(update.last_name.as_deref())
        .bind(update.gender.as_deref())
        .bind(update.birthdate)
        .bind(update.contact_num.as_deref())
        .bind(update.bio.as_deref())
        .bind(Utc::now())
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(user_row) = row else {
            return Err(RepositoryError::NotFound);
        };

        // One-to-one upsert: the unique constraint on user_id turns the
        // concurrent first-edit race into a plain update.
        let address = match &update.address {
            Some(fields) => {
                let addr = sqlx::query_as::<_, AddressRow>(
                    "INSERT INTO addresses (user_id, street_address, city, province, zip_code) \
                     VALUES (?, ?, ?, ?, ?) \
                     ON CONFLICT (user_id) DO UPDATE SET \
                         street_address = excluded.street_address, \
                         city = excluded.city, \
                         province = excluded.province, \
                         zip_code = excluded.zip_code \
                     RETURNING id, user_id, street_address, city, province, zip_code",
                )
                .bind(user_id)
                .bind(&fields.street_address)
                .bind(&fields.city)
                .bind(&fields.province)
                .bind(&fields.zip_code)
                .fetch_one(&mut *tx)
                .await?;

                Some(addr.into())
            }
            None => self.fetch_address(&mut tx, user_id).await?,
        };

        tx.commit().await?;

        Ok((user_row.into(), address))
    }

    /// Get a user's address, if they have one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_address(&self, user_id: UserId) -> Result<Option<Address>, RepositoryError> {
        let row = sqlx::query_as::<_, AddressRow>(
            "SELECT id, user_id, street_address, city, province, zip_code \
             FROM addresses WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Set a user's profile image path.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_profile_image(
        &self,
        user_id: UserId,
        img_url: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE users SET profile_img_url = ?, updated_at = ? WHERE id = ?")
            .bind(img_url)
            .bind(Utc::now())
            .bind(user_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Mark a user as admin.
    ///
    /// The flag is reserved: nothing reads it yet. Only the seed
    /// bootstrapper sets it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_admin(&self, user_id: UserId, is_admin: bool) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE users SET is_admin = ?, updated_at = ? WHERE id = ?")
            .bind(is_admin)
            .bind(Utc::now())
            .bind(user_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn fetch_address(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        user_id: UserId,
    ) -> Result<Option<Address>, RepositoryError> {
        let row = sqlx::query_as::<_, AddressRow>(
            "SELECT id, user_id, street_address, city, province, zip_code \
             FROM addresses WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(row.map(Into::into))
    }
}

//! Profile route handlers.
//!
//! Profile editing is the one place the one-to-one address is written: the
//! first edit that carries address fields creates the row, later edits
//! update it in place.

use axum::{
    Json,
    extract::{Multipart, State},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::users::UserRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{Address, AddressUpdate, ProfileUpdate};
use crate::routes::auth::UserResponse;
use crate::services::images::ImageKind;
use crate::state::AppState;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Profile edit request body.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub contact_num: Option<String>,
    pub bio: Option<String>,
    pub address: Option<AddressRequest>,
}

/// Address fields of a profile edit.
#[derive(Debug, Deserialize)]
pub struct AddressRequest {
    pub street_address: String,
    pub city: String,
    pub province: String,
    pub zip_code: String,
}

impl From<AddressRequest> for AddressUpdate {
    fn from(req: AddressRequest) -> Self {
        Self {
            street_address: req.street_address,
            city: req.city,
            province: req.province,
            zip_code: req.zip_code,
        }
    }
}

/// An address as exposed over the API.
#[derive(Debug, Serialize)]
pub struct AddressResponse {
    pub street_address: String,
    pub city: String,
    pub province: String,
    pub zip_code: String,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            street_address: address.street_address,
            city: address.city,
            province: address.province,
            zip_code: address.zip_code,
        }
    }
}

/// Profile view: the user and their address, if any.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: UserResponse,
    pub address: Option<AddressResponse>,
}

/// Response after an image upload.
#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub img_url: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the current user's profile and address.
///
/// # Errors
///
/// Returns 404 if the session references a user that no longer exists.
pub async fn show(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>> {
    let users = UserRepository::new(state.pool());

    let user = users
        .get_by_id(current.id)
        .await?
        .ok_or_else(|| AppError::NotFound("user".to_owned()))?;
    let address = users.get_address(current.id).await?;

    Ok(Json(ProfileResponse {
        user: user.into(),
        address: address.map(Into::into),
    }))
}

/// Edit the current user's profile.
///
/// Profile fields and the address upsert commit in one transaction.
///
/// # Errors
///
/// Returns 404 if the session references a user that no longer exists.
pub async fn update(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>> {
    let update = ProfileUpdate {
        first_name: body.first_name,
        last_name: body.last_name,
        gender: body.gender,
        birthdate: body.birthdate,
        contact_num: body.contact_num,
        bio: body.bio,
        address: body.address.map(Into::into),
    };

    let users = UserRepository::new(state.pool());
    let (user, address) = users.update_profile(current.id, &update).await?;

    Ok(Json(ProfileResponse {
        user: user.into(),
        address: address.map(Into::into),
    }))
}

/// Upload a profile image.
///
/// The file is written before the user row is touched; a failed write aborts
/// the update entirely.
///
/// # Errors
///
/// Returns 400 if the multipart body has no usable `image` field.
pub async fn upload_image(
    RequireAuth(current): RequireAuth,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ImageResponse>> {
    let (filename, bytes) = read_image_field(multipart).await?;

    let img_url = state
        .images()
        .save(ImageKind::Profile, &filename, &bytes)
        .await?;

    UserRepository::new(state.pool())
        .set_profile_image(current.id, &img_url)
        .await?;

    Ok(Json(ImageResponse { img_url }))
}

/// Pull the `image` field out of a multipart body.
pub(crate) async fn read_image_field(mut multipart: Multipart) -> Result<(String, Vec<u8>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let filename = field
            .file_name()
            .ok_or_else(|| AppError::BadRequest("image field has no filename".to_owned()))?
            .to_owned();

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("failed to read upload: {e}")))?;

        return Ok((filename, bytes.to_vec()));
    }

    Err(AppError::BadRequest("missing image field".to_owned()))
}

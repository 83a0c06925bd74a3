//! Authentication route handlers.
//!
//! Handles registration, login, and logout. Registration does not open a
//! session; the new user logs in afterwards.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::{AppError, Result};
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::{CurrentUser, User};
use crate::services::auth::AuthService;
use crate::state::AppState;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub password_confirm: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// A user as exposed over the API.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: palengke_core::UserId,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub birthdate: Option<chrono::NaiveDate>,
    pub contact_num: String,
    pub bio: Option<String>,
    pub profile_img_url: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username.into_inner(),
            first_name: user.first_name,
            last_name: user.last_name,
            gender: user.gender,
            birthdate: user.birthdate,
            contact_num: user.contact_num,
            bio: user.bio,
            profile_img_url: user.profile_img_url,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle registration.
///
/// # Errors
///
/// Returns 400 for mismatched passwords or weak credentials and 409 for a
/// taken username.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    if body.password != body.password_confirm {
        return Err(AppError::BadRequest("passwords do not match".to_owned()));
    }

    let service = AuthService::new(state.pool());
    let user = service.register(&body.username, &body.password).await?;

    tracing::info!(user_id = %user.id, "account created");

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Handle login.
///
/// On success the session carries the user identity until logout or expiry.
///
/// # Errors
///
/// Returns 401 when the credentials don't match.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginRequest>,
) -> Result<Json<UserResponse>> {
    let service = AuthService::new(state.pool());
    let user = service.login(&body.username, &body.password).await?;

    let current = CurrentUser {
        id: user.id,
        username: user.username.as_str().to_owned(),
    };
    set_current_user(&session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("failed to persist session: {e}")))?;

    tracing::info!(user_id = %user.id, "logged in");

    Ok(Json(user.into()))
}

/// Handle logout.
///
/// # Errors
///
/// Returns 500 if the session cannot be cleared.
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("failed to clear session: {e}")))?;

    Ok(StatusCode::NO_CONTENT)
}

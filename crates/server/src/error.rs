//! Unified error handling.
//!
//! Provides a unified `AppError` type that maps every failure class to an
//! HTTP status and a JSON body. All route handlers return
//! `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::images::ImageError;
use crate::services::shop::ShopError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Shop or inventory operation failed.
    #[error("Shop error: {0}")]
    Shop(#[from] ShopError),

    /// Image upload failed.
    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Nobody is logged in.
    #[error("Unauthorized")]
    Unauthorized,

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON body returned for every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Database(err) => match err {
                RepositoryError::NotFound => StatusCode::NOT_FOUND,
                RepositoryError::Conflict(_) => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials | AuthError::UserNotFound => {
                    StatusCode::UNAUTHORIZED
                }
                AuthError::UserAlreadyExists => StatusCode::CONFLICT,
                AuthError::WeakPassword(_) | AuthError::InvalidUsername(_) => {
                    StatusCode::BAD_REQUEST
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Shop(err) => match err {
                ShopError::Validation(_)
                | ShopError::BranchCycle
                | ShopError::BranchTooDeep { .. } => StatusCode::BAD_REQUEST,
                ShopError::NoShop | ShopError::NotFound => StatusCode::NOT_FOUND,
                ShopError::AlreadyHasShop => StatusCode::CONFLICT,
                ShopError::NotOwner => StatusCode::FORBIDDEN,
                ShopError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Image(err) => match err {
                ImageError::UnsupportedExtension(_) => StatusCode::BAD_REQUEST,
                ImageError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to expose to clients.
    fn public_message(&self) -> String {
        match self {
            Self::Database(err) => match err {
                RepositoryError::NotFound => "not found".to_owned(),
                RepositoryError::Conflict(msg) => msg.clone(),
                _ => "internal server error".to_owned(),
            },
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials | AuthError::UserNotFound => {
                    "invalid credentials".to_owned()
                }
                AuthError::UserAlreadyExists => "username already taken".to_owned(),
                AuthError::WeakPassword(msg) => msg.clone(),
                AuthError::InvalidUsername(e) => e.to_string(),
                _ => "internal server error".to_owned(),
            },
            Self::Shop(err) => match err {
                ShopError::Repository(_) => "internal server error".to_owned(),
                other => other.to_string(),
            },
            Self::Image(err) => match err {
                ImageError::UnsupportedExtension(_) => err.to_string(),
                ImageError::Io(_) => "internal server error".to_owned(),
            },
            Self::Internal(_) => "internal server error".to_owned(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request error");
        }

        let body = ErrorBody {
            error: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("shop 123".to_string());
        assert_eq!(err.to_string(), "Not found: shop 123");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            let response = err.into_response();
            response.status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(get_status(AppError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Shop(ShopError::NotOwner)),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::Shop(ShopError::AlreadyHasShop)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_details_not_exposed() {
        let err = AppError::Internal("connection string leaked".to_string());
        assert_eq!(err.public_message(), "internal server error");
    }
}

//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. Every error reaches the client as
//! `{"message": "..."}` with a matching status code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::AuthError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An entity with the same unique name already exists.
    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// JSON body for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials
                | AuthError::UserNotFound
                | AuthError::MissingToken
                | AuthError::InvalidToken(_)
                | AuthError::TokenExpired => StatusCode::UNAUTHORIZED,
                AuthError::UserAlreadyExists | AuthError::InvalidInput(_) => {
                    StatusCode::BAD_REQUEST
                }
                AuthError::TokenSigning(_) | AuthError::Repository(_) | AuthError::PasswordHash => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Duplicate(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    // Internal details stay in logs and Sentry.
    fn client_message(&self) -> String {
        match self {
            Self::Database(_) => "Internal server error".to_string(),
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => "Invalid credentials".to_string(),
                AuthError::UserAlreadyExists => {
                    "A user with that username already exists.".to_string()
                }
                AuthError::InvalidInput(msg) => msg.clone(),
                AuthError::MissingToken => "Request does not contain an access token".to_string(),
                AuthError::InvalidToken(_) => "Invalid access token".to_string(),
                AuthError::TokenExpired => "Access token has expired".to_string(),
                AuthError::UserNotFound => "User does not exist".to_string(),
                _ => "Authentication error".to_string(),
            },
            Self::NotFound(msg) | Self::Duplicate(msg) | Self::BadRequest(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else if let Self::Auth(err) = &self {
            tracing::debug!(error = %err, "Request rejected");
        }

        let body = ErrorBody {
            message: self.client_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context for the authenticated user.
///
/// Call this after verifying an access token to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, username: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            username: Some(username.to_string()),
            ..Default::default()
        }));
    });
}

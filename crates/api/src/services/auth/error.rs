//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or password missing or blank.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// User already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Token subject names a user that no longer exists.
    #[error("user not found")]
    UserNotFound,

    /// No `Authorization` header on a guarded request.
    #[error("missing access token")]
    MissingToken,

    /// Token is malformed, has a bad signature, or uses an unknown scheme.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// Token is past its `exp` claim.
    #[error("token expired")]
    TokenExpired,

    /// Token could not be signed.
    #[error("token signing error: {0}")]
    TokenSigning(#[source] jsonwebtoken::errors::Error),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

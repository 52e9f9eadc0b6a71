//! Business logic that sits between route handlers and repositories.

pub mod auth;

pub use auth::{AuthError, AuthService, Claims, TokenSigner};

//! Authentication service.
//!
//! Provides username/password registration and login, plus access token
//! issuance through [`TokenSigner`].

mod error;
mod token;

pub use error::AuthError;
pub use token::{Claims, TokenSigner};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::SqlitePool;

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

/// Maximum username length.
const MAX_USERNAME_LENGTH: usize = 80;

/// Authentication service.
///
/// Handles user registration, login, and resolving token subjects to users.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new user with username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidInput` if the username or password is blank.
    /// Returns `AuthError::UserAlreadyExists` if the username is taken.
    pub async fn register(&self, username: &str, password: &str) -> Result<User, AuthError> {
        validate_username(username)?;
        validate_password(password)?;

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create_with_password(username, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Login with username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the username/password is wrong.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let (user, password_hash) = self
            .users
            .get_password_hash(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(user)
    }

    /// Resolve verified token claims to the user they name.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` if the subject is malformed.
    /// Returns `AuthError::UserNotFound` if the user has since been removed.
    pub async fn current_user(&self, claims: &Claims) -> Result<User, AuthError> {
        let user_id = claims.user_id()?;
        self.users
            .get_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

/// Validate username meets requirements.
fn validate_username(username: &str) -> Result<(), AuthError> {
    if username.trim().is_empty() {
        return Err(AuthError::InvalidInput(
            "username cannot be blank".to_string(),
        ));
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(AuthError::InvalidInput(format!(
            "username must be at most {MAX_USERNAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.is_empty() {
        return Err(AuthError::InvalidInput(
            "password cannot be blank".to_string(),
        ));
    }
    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("1234").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("1234", &hash).is_ok());
        assert!(matches!(
            verify_password("4321", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("user test").is_ok());
        assert!(validate_username("   ").is_err());
        assert!(validate_username(&"u".repeat(81)).is_err());
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let pool = test_pool().await;
        let auth = AuthService::new(&pool);

        let registered = auth.register("test", "1234").await.unwrap();
        let logged_in = auth.login("test", "1234").await.unwrap();

        assert_eq!(registered.id, logged_in.id);
    }

    #[tokio::test]
    async fn test_password_is_not_stored_in_plaintext() {
        let pool = test_pool().await;
        AuthService::new(&pool).register("test", "1234").await.unwrap();

        let (_, stored) = UserRepository::new(&pool)
            .get_password_hash("test")
            .await
            .unwrap()
            .unwrap();
        assert_ne!(stored, "1234");
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let pool = test_pool().await;
        let auth = AuthService::new(&pool);
        auth.register("test", "1234").await.unwrap();

        assert!(matches!(
            auth.login("test", "wrong").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("nobody", "1234").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_register_duplicate() {
        let pool = test_pool().await;
        let auth = AuthService::new(&pool);
        auth.register("test", "1234").await.unwrap();

        assert!(matches!(
            auth.register("test", "5678").await,
            Err(AuthError::UserAlreadyExists)
        ));
    }

    #[tokio::test]
    async fn test_current_user_for_deleted_subject() {
        let pool = test_pool().await;
        let claims = Claims {
            sub: "42".to_string(),
            iat: 0,
            nbf: 0,
            exp: 0,
        };

        assert!(matches!(
            AuthService::new(&pool).current_user(&claims).await,
            Err(AuthError::UserNotFound)
        ));
    }
}

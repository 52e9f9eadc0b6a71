//! Database operations for the Storekeep `SQLite` database.
//!
//! ## Tables
//!
//! - `stores` - Named stores
//! - `items` - Priced items, each owned by a store (`ON DELETE CASCADE`)
//! - `users` - API users with Argon2 password hashes
//!
//! # Migrations
//!
//! Migrations live in `crates/api/migrations/` and are embedded into the
//! binary. The server applies them on startup; they can also be run via:
//! ```bash
//! cargo run -p storekeep-cli -- migrate
//! ```

pub mod items;
pub mod stores;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::SqlitePool;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub use items::ItemRepository;
pub use stores::StoreRepository;
pub use users::UserRepository;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique name).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// A foreign key points at a row that does not exist.
    #[error("missing reference: {0}")]
    MissingReference(String),
}

impl RepositoryError {
    /// Classify a write error, turning constraint violations into typed variants.
    pub(crate) fn from_write(err: sqlx::Error, entity: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                return Self::Conflict(format!("{entity} already exists"));
            }
            if db_err.is_foreign_key_violation() {
                return Self::MissingReference(format!("{entity} references a missing row"));
            }
        }
        Self::Database(err)
    }
}

/// Create a `SQLite` connection pool with foreign keys enforced.
///
/// In-memory databases are pinned to a single long-lived connection so the
/// schema survives for the lifetime of the pool.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the connection cannot be established.
pub async fn create_pool(
    database_url: &SecretString,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    let url = database_url.expose_secret();
    let options = SqliteConnectOptions::from_str(url)?.foreign_keys(true);

    let pool = SqlitePoolOptions::new().acquire_timeout(Duration::from_secs(10));
    let pool = if url.contains(":memory:") || url.contains("mode=memory") {
        pool.max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        pool.max_connections(max_connections.max(1))
    };

    pool.connect_with(options).await
}

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns `MigrateError` if a migration fails or the recorded history diverges.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}

/// Fresh in-memory database with the schema applied.
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = create_pool(&SecretString::from("sqlite::memory:"), 1)
        .await
        .expect("in-memory pool");
    run_migrations(&pool).await.expect("migrations");
    pool
}

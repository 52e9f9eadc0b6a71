//! Subcommand implementations.

pub mod migrate;
pub mod user;

use sqlx::SqlitePool;
use thiserror::Error;

use storekeep_api::config::{ConfigError, DatabaseConfig};
use storekeep_api::db;
use storekeep_api::services::AuthError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Applying migrations failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// User management failed.
    #[error("{0}")]
    Auth(#[from] AuthError),
}

/// Connect to the configured database.
async fn connect() -> Result<SqlitePool, CommandError> {
    let config = DatabaseConfig::from_env()?;

    tracing::info!("Connecting to database...");
    Ok(db::create_pool(&config.url, config.max_connections).await?)
}

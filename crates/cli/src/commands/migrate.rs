//! Database migration command.
//!
//! Migrations are embedded in the API crate from `crates/api/migrations/`;
//! the server applies them on startup too, so this is for preparing a
//! database ahead of a deploy.

use super::{CommandError, connect};

/// Apply all pending migrations.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    storekeep_api::db::run_migrations(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}

//! User management commands.

use storekeep_api::services::AuthService;

use super::{CommandError, connect};

/// Create a user, applying migrations first so a fresh database works.
pub async fn create(username: &str, password: &str) -> Result<(), CommandError> {
    let pool = connect().await?;
    storekeep_api::db::run_migrations(&pool).await?;

    let user = AuthService::new(&pool).register(username, password).await?;

    tracing::info!(user_id = %user.id, "Created user: {}", user.username);
    Ok(())
}

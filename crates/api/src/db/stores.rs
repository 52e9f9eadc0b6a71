//! Store repository for database operations.

use sqlx::SqlitePool;

use storekeep_core::StoreId;

use super::RepositoryError;
use crate::models::Store;

#[derive(sqlx::FromRow)]
struct StoreRow {
    id: i64,
    name: String,
}

impl From<StoreRow> for Store {
    fn from(row: StoreRow) -> Self {
        Self {
            id: StoreId::new(row.id),
            name: row.name,
        }
    }
}

/// Repository for store database operations.
pub struct StoreRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> StoreRepository<'a> {
    /// Create a new store repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a store by its name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_name(&self, name: &str) -> Result<Option<Store>, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>("SELECT id, name FROM stores WHERE name = ?")
            .bind(name)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Store::from))
    }

    /// List every store, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Store>, RepositoryError> {
        let rows = sqlx::query_as::<_, StoreRow>("SELECT id, name FROM stores ORDER BY id ASC")
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Store::from).collect())
    }

    /// Insert a new store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a store with this name exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, name: &str) -> Result<Store, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            INSERT INTO stores (name)
            VALUES (?)
            RETURNING id, name
            ",
        )
        .bind(name)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "store"))?;

        Ok(row.into())
    }

    /// Delete a store and, through the foreign key cascade, its items.
    ///
    /// # Returns
    ///
    /// Returns `true` if the store was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_by_name(&self, name: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM stores WHERE name = ?")
            .bind(name)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

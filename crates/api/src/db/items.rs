//! Item repository for database operations.
//!
//! Name uniqueness and the store reference are enforced by the schema; this
//! module maps those constraint violations to [`RepositoryError`] variants.

use sqlx::SqlitePool;

use storekeep_core::{ItemId, Price, StoreId};

use super::RepositoryError;
use crate::models::Item;

/// Raw `items` row.
#[derive(sqlx::FromRow)]
struct ItemRow {
    id: i64,
    name: String,
    price: String,
    store_id: i64,
}

impl TryFrom<ItemRow> for Item {
    type Error = RepositoryError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        let price = row.price.parse::<Price>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
        })?;

        Ok(Self {
            id: ItemId::new(row.id),
            name: row.name,
            price,
            store_id: StoreId::new(row.store_id),
        })
    }
}

/// Repository for item database operations.
pub struct ItemRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ItemRepository<'a> {
    /// Create a new item repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get an item by its name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored price is invalid.
    pub async fn get_by_name(&self, name: &str) -> Result<Option<Item>, RepositoryError> {
        let row = sqlx::query_as::<_, ItemRow>(
            r"
            SELECT id, name, price, store_id
            FROM items
            WHERE name = ?
            ",
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        row.map(Item::try_from).transpose()
    }

    /// List every item, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any stored price is invalid.
    pub async fn list(&self) -> Result<Vec<Item>, RepositoryError> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r"
            SELECT id, name, price, store_id
            FROM items
            ORDER BY id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Item::try_from).collect()
    }

    /// List the items owned by a store, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any stored price is invalid.
    pub async fn list_by_store(&self, store_id: StoreId) -> Result<Vec<Item>, RepositoryError> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r"
            SELECT id, name, price, store_id
            FROM items
            WHERE store_id = ?
            ORDER BY id ASC
            ",
        )
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Item::try_from).collect()
    }

    /// Insert a new item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if an item with this name exists.
    /// Returns `RepositoryError::MissingReference` if the store does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        name: &str,
        price: Price,
        store_id: StoreId,
    ) -> Result<Item, RepositoryError> {
        let row = sqlx::query_as::<_, ItemRow>(
            r"
            INSERT INTO items (name, price, store_id)
            VALUES (?, ?, ?)
            RETURNING id, name, price, store_id
            ",
        )
        .bind(name)
        .bind(price.to_string())
        .bind(store_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "item"))?;

        Item::try_from(row)
    }

    /// Insert the item, or update only its price if the name is taken.
    ///
    /// `store_id` is used only when the item is created; an existing item
    /// keeps its store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::MissingReference` if the item is new and the
    /// store does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn upsert(
        &self,
        name: &str,
        price: Price,
        store_id: StoreId,
    ) -> Result<Item, RepositoryError> {
        let row = sqlx::query_as::<_, ItemRow>(
            r"
            INSERT INTO items (name, price, store_id)
            VALUES (?, ?, ?)
            ON CONFLICT (name) DO UPDATE SET price = excluded.price
            RETURNING id, name, price, store_id
            ",
        )
        .bind(name)
        .bind(price.to_string())
        .bind(store_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "item"))?;

        Item::try_from(row)
    }

    /// Delete an item by name.
    ///
    /// # Returns
    ///
    /// Returns `true` if the item was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_by_name(&self, name: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM items WHERE name = ?")
            .bind(name)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

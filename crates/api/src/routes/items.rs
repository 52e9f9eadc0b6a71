//! Item route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use storekeep_core::{Price, StoreId};

use super::MessageResponse;
use crate::db::{ItemRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::extract::JsonOrForm;
use crate::middleware::RequireAuth;
use crate::models::Item;
use crate::state::AppState;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Body for creating or updating an item.
#[derive(Debug, Deserialize)]
pub struct ItemRequest {
    pub price: Price,
    pub store_id: StoreId,
}

/// Public JSON shape of an item.
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub name: String,
    pub price: Price,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            name: item.name,
            price: item.price,
        }
    }
}

/// Body of `GET /items`.
#[derive(Debug, Serialize)]
pub struct ItemListResponse {
    pub items: Vec<ItemResponse>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Fetch one item. Requires an access token.
///
/// # Errors
///
/// Returns 401 without a valid token, 404 if the item does not exist.
pub async fn show(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ItemResponse>> {
    let item = ItemRepository::new(state.pool())
        .get_by_name(&name)
        .await?
        .ok_or_else(|| AppError::NotFound("Item not found".to_string()))?;

    Ok(Json(item.into()))
}

/// Create an item.
///
/// # Errors
///
/// Returns 400 if the name is taken, the store does not exist, or the body
/// is malformed.
pub async fn create(
    State(state): State<AppState>,
    Path(name): Path<String>,
    JsonOrForm(body): JsonOrForm<ItemRequest>,
) -> Result<(StatusCode, Json<ItemResponse>)> {
    let item = ItemRepository::new(state.pool())
        .create(&name, body.price, body.store_id)
        .await
        .map_err(|e| write_error(e, &name, body.store_id))?;

    tracing::info!(item = %item.name, store_id = %item.store_id, price = %item.price, "Item created");

    Ok((StatusCode::CREATED, Json(item.into())))
}

/// Create the item if absent, otherwise update its price.
///
/// Always answers 200; an existing item keeps its store.
///
/// # Errors
///
/// Returns 400 if a new item names a missing store or the body is malformed.
pub async fn upsert(
    State(state): State<AppState>,
    Path(name): Path<String>,
    JsonOrForm(body): JsonOrForm<ItemRequest>,
) -> Result<Json<ItemResponse>> {
    let item = ItemRepository::new(state.pool())
        .upsert(&name, body.price, body.store_id)
        .await
        .map_err(|e| write_error(e, &name, body.store_id))?;

    tracing::info!(item = %item.name, price = %item.price, "Item upserted");

    Ok(Json(item.into()))
}

/// Delete an item. Succeeds whether or not it existed.
///
/// # Errors
///
/// Returns 500 if the database is unavailable.
pub async fn delete(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<MessageResponse>> {
    let deleted = ItemRepository::new(state.pool())
        .delete_by_name(&name)
        .await?;

    tracing::info!(item = %name, deleted, "Item delete requested");

    Ok(Json(MessageResponse::new("Item deleted")))
}

/// List all items.
///
/// # Errors
///
/// Returns 500 if the database is unavailable.
pub async fn index(State(state): State<AppState>) -> Result<Json<ItemListResponse>> {
    let items = ItemRepository::new(state.pool()).list().await?;

    Ok(Json(ItemListResponse {
        items: items.into_iter().map(ItemResponse::from).collect(),
    }))
}

fn write_error(err: RepositoryError, name: &str, store_id: StoreId) -> AppError {
    match err {
        RepositoryError::Conflict(_) => {
            AppError::Duplicate(format!("An item with name '{name}' already exists."))
        }
        RepositoryError::MissingReference(_) => {
            AppError::BadRequest(format!("Store with id {store_id} does not exist."))
        }
        other => AppError::Database(other),
    }
}

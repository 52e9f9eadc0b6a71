//! Store route handlers.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

use storekeep_core::StoreId;

use super::MessageResponse;
use super::items::ItemResponse;
use crate::db::{ItemRepository, RepositoryError, StoreRepository};
use crate::error::{AppError, Result};
use crate::models::Store;
use crate::state::AppState;

/// Public JSON shape of a store, with its items inlined.
#[derive(Debug, Serialize)]
pub struct StoreResponse {
    pub name: String,
    pub items: Vec<ItemResponse>,
}

impl StoreResponse {
    fn new(store: Store, items: Vec<ItemResponse>) -> Self {
        Self {
            name: store.name,
            items,
        }
    }
}

/// Body of `GET /stores`.
#[derive(Debug, Serialize)]
pub struct StoreListResponse {
    pub stores: Vec<StoreResponse>,
}

/// Fetch one store with its items.
///
/// # Errors
///
/// Returns 404 if the store does not exist.
pub async fn show(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<StoreResponse>> {
    let store = StoreRepository::new(state.pool())
        .get_by_name(&name)
        .await?
        .ok_or_else(|| AppError::NotFound("Store not found".to_string()))?;

    let items = ItemRepository::new(state.pool())
        .list_by_store(store.id)
        .await?
        .into_iter()
        .map(ItemResponse::from)
        .collect();

    Ok(Json(StoreResponse::new(store, items)))
}

/// Create a store.
///
/// # Errors
///
/// Returns 400 if a store with this name already exists.
pub async fn create(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<(StatusCode, Json<StoreResponse>)> {
    let store = StoreRepository::new(state.pool())
        .create(&name)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => {
                AppError::Duplicate(format!("A store with name '{name}' already exists."))
            }
            other => AppError::Database(other),
        })?;

    tracing::info!(store_id = %store.id, store = %store.name, "Store created");

    Ok((
        StatusCode::CREATED,
        Json(StoreResponse::new(store, Vec::new())),
    ))
}

/// Delete a store and its items. Succeeds whether or not it existed.
///
/// # Errors
///
/// Returns 500 if the database is unavailable.
pub async fn delete(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<MessageResponse>> {
    let deleted = StoreRepository::new(state.pool())
        .delete_by_name(&name)
        .await?;

    tracing::info!(store = %name, deleted, "Store delete requested");

    Ok(Json(MessageResponse::new("Store deleted")))
}

/// List all stores with their items.
///
/// # Errors
///
/// Returns 500 if the database is unavailable.
pub async fn index(State(state): State<AppState>) -> Result<Json<StoreListResponse>> {
    let stores = StoreRepository::new(state.pool()).list().await?;
    let items = ItemRepository::new(state.pool()).list().await?;

    let mut by_store: HashMap<StoreId, Vec<ItemResponse>> = HashMap::new();
    for item in items {
        by_store
            .entry(item.store_id)
            .or_default()
            .push(ItemResponse::from(item));
    }

    let stores = stores
        .into_iter()
        .map(|store| {
            let items = by_store.remove(&store.id).unwrap_or_default();
            StoreResponse::new(store, items)
        })
        .collect();

    Ok(Json(StoreListResponse { stores }))
}

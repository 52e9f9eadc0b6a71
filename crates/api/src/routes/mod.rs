//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! # Auth
//! POST   /auth            - Exchange username/password for an access token
//! POST   /register        - Create a user
//!
//! # Items
//! GET    /item/{name}     - Item detail (requires token)
//! POST   /item/{name}     - Create item
//! PUT    /item/{name}     - Create or update item price
//! DELETE /item/{name}     - Delete item
//! GET    /items           - All items
//!
//! # Stores
//! GET    /store/{name}    - Store with its items
//! POST   /store/{name}    - Create store
//! DELETE /store/{name}    - Delete store and its items
//! GET    /stores          - All stores with their items
//! ```

pub mod auth;
pub mod items;
pub mod stores;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Serialize;

use crate::state::AppState;

/// Body for responses that only carry a message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth", post(auth::login))
        .route("/register", post(users::register))
}

/// Create the item routes router.
pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/item/{name}",
            get(items::show)
                .post(items::create)
                .put(items::upsert)
                .delete(items::delete),
        )
        .route("/items", get(items::index))
}

/// Create the store routes router.
pub fn store_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/store/{name}",
            get(stores::show).post(stores::create).delete(stores::delete),
        )
        .route("/stores", get(stores::index))
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(item_routes())
        .merge(store_routes())
}

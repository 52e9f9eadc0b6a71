//! Integration tests for Storekeep.
//!
//! Each [`TestContext`] serves the full router on an ephemeral local port,
//! backed by its own in-memory `SQLite` database, so tests run in parallel
//! without any external services.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p storekeep-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc)]

use std::net::{IpAddr, SocketAddr};

use reqwest::{Client, Response};
use secrecy::SecretString;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use storekeep_api::app::build_app;
use storekeep_api::config::ApiConfig;
use storekeep_api::db::{self, ItemRepository, StoreRepository};
use storekeep_api::state::AppState;
use storekeep_core::{Price, StoreId};

/// Username registered by [`TestContext::auth_header`].
pub const TEST_USERNAME: &str = "test_user";
/// Password registered by [`TestContext::auth_header`].
pub const TEST_PASSWORD: &str = "test_password";

/// Signing key used by every test server.
const TEST_JWT_SECRET: &str = "k7Qx2mVb9RzT4wLp8NcY3hJd6GfS1aEu";

/// A running API server with a private database.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    pub pool: SqlitePool,
    server: JoinHandle<()>,
}

impl TestContext {
    /// Start a server on an ephemeral port with a fresh database.
    pub async fn new() -> Self {
        let pool = db::create_pool(&SecretString::from("sqlite::memory:"), 1)
            .await
            .expect("Failed to create in-memory pool");
        db::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        let config = test_config(addr);
        let app = build_app(AppState::new(config, pool.clone()));

        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        Self {
            client: Client::new(),
            base_url: format!("http://{addr}"),
            pool,
            server,
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Insert a store directly and return its id.
    pub async fn create_store(&self, name: &str) -> StoreId {
        StoreRepository::new(&self.pool)
            .create(name)
            .await
            .expect("Failed to create store")
            .id
    }

    /// Insert an item directly.
    pub async fn create_item(&self, name: &str, price: &str, store_id: StoreId) {
        let price: Price = price.parse().expect("Invalid test price");
        ItemRepository::new(&self.pool)
            .create(name, price, store_id)
            .await
            .expect("Failed to create item");
    }

    /// `POST /register` with a JSON body.
    pub async fn register(&self, username: &str, password: &str) -> Response {
        self.client
            .post(self.url("/register"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Register request failed")
    }

    /// `POST /auth` with a JSON body.
    pub async fn login(&self, username: &str, password: &str) -> Response {
        self.client
            .post(self.url("/auth"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Auth request failed")
    }

    /// Register the test user, log in, and return an `Authorization` value.
    pub async fn auth_header(&self) -> String {
        let resp = self.register(TEST_USERNAME, TEST_PASSWORD).await;
        assert_eq!(resp.status(), 201, "registering the test user");

        let body: Value = self
            .login(TEST_USERNAME, TEST_PASSWORD)
            .await
            .json()
            .await
            .expect("Auth response was not JSON");
        let token = body["access_token"]
            .as_str()
            .expect("Auth response has no access_token");

        format!("JWT {token}")
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        self.server.abort();
    }
}

fn test_config(addr: SocketAddr) -> ApiConfig {
    ApiConfig {
        database_url: SecretString::from("sqlite::memory:"),
        max_connections: 1,
        host: IpAddr::from([127, 0, 0, 1]),
        port: addr.port(),
        jwt_secret: SecretString::from(TEST_JWT_SECRET),
        token_ttl_secs: 300,
        sentry_dsn: None,
        sentry_environment: None,
    }
}

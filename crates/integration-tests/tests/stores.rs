//! Integration tests for the store endpoints.

use reqwest::StatusCode;
use serde_json::{Value, json};

use storekeep_integration_tests::TestContext;

#[tokio::test]
async fn test_create_store() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .post(ctx.url("/store/test"))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body, json!({ "name": "test", "items": [] }));
}

#[tokio::test]
async fn test_create_duplicate_store() {
    let ctx = TestContext::new().await;
    ctx.create_store("test").await;

    let resp = ctx
        .client
        .post(ctx.url("/store/test"))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(
        body,
        json!({ "message": "A store with name 'test' already exists." })
    );
}

#[tokio::test]
async fn test_find_store() {
    let ctx = TestContext::new().await;
    ctx.create_store("test").await;

    let resp = ctx
        .client
        .get(ctx.url("/store/test"))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body, json!({ "name": "test", "items": [] }));
}

#[tokio::test]
async fn test_store_not_found() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .get(ctx.url("/store/test"))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body, json!({ "message": "Store not found" }));
}

#[tokio::test]
async fn test_store_found_with_items() {
    let ctx = TestContext::new().await;
    let store_id = ctx.create_store("test").await;
    ctx.create_item("test", "19.99", store_id).await;

    let resp = ctx
        .client
        .get(ctx.url("/store/test"))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(
        body,
        json!({ "name": "test", "items": [{ "name": "test", "price": 19.99 }] })
    );
}

#[tokio::test]
async fn test_delete_store() {
    let ctx = TestContext::new().await;
    ctx.create_store("test").await;

    let resp = ctx
        .client
        .delete(ctx.url("/store/test"))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body, json!({ "message": "Store deleted" }));

    let resp = ctx
        .client
        .get(ctx.url("/store/test"))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_store_removes_its_items() {
    let ctx = TestContext::new().await;
    let store_id = ctx.create_store("test").await;
    ctx.create_item("chair", "12.50", store_id).await;

    ctx.client
        .delete(ctx.url("/store/test"))
        .send()
        .await
        .expect("Request failed");

    let body: Value = ctx
        .client
        .get(ctx.url("/items"))
        .send()
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Failed to parse JSON");
    assert_eq!(body, json!({ "items": [] }));
}

#[tokio::test]
async fn test_store_list() {
    let ctx = TestContext::new().await;
    ctx.create_store("test").await;

    let resp = ctx
        .client
        .get(ctx.url("/stores"))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body, json!({ "stores": [{ "name": "test", "items": [] }] }));
}

#[tokio::test]
async fn test_store_list_with_items() {
    let ctx = TestContext::new().await;
    let hardware = ctx.create_store("hardware").await;
    ctx.create_store("empty").await;
    ctx.create_item("hammer", "9.99", hardware).await;

    let body: Value = ctx
        .client
        .get(ctx.url("/stores"))
        .send()
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Failed to parse JSON");

    assert_eq!(
        body,
        json!({ "stores": [
            { "name": "hardware", "items": [{ "name": "hammer", "price": 9.99 }] },
            { "name": "empty", "items": [] },
        ] })
    );
}

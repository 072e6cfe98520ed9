//! Integration tests for the `/cart-items` REST resource
//!
//! These tests drive the full router against the in-memory store and verify:
//! - Create / get / replace / delete lifecycle and status codes
//! - Full-overwrite replace semantics
//! - Search term translation
//! - Error bodies for missing and malformed identifiers
//! - Error bodies when the store itself fails

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use mongodb::bson::oid::ObjectId;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`

use cart_items_rust::cart::helpers::SearchFilter;
use cart_items_rust::cart::models::CartItem;
use cart_items_rust::cart::{AppState, CartItemStore, InMemoryCartItemStore, StoreError};
use cart_items_rust::router::create_app_router;

const MISSING_ID: &str = "65f1c0ffee0000000000abcd";

/// Helper function to create a test app instance
fn create_test_app() -> axum::Router {
    let state = Arc::new(AppState::new(InMemoryCartItemStore::new()));
    create_app_router(state)
}

/// Helper function to send a request and get the response status and JSON body
async fn send_request(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, body)
}

/// Creates an item and returns its assigned id
async fn create(app: &axum::Router, body: Value) -> String {
    let (status, created) = send_request(app, "POST", "/cart-items", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    created["_id"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn test_create_get_delete_lifecycle() {
    let app = create_test_app();

    let (status, created) = send_request(
        &app,
        "POST",
        "/cart-items",
        Some(json!({ "product": "Widget", "price": 5 })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let id = created["_id"].as_str().unwrap().to_owned();
    assert_eq!(id.len(), 24);
    assert_eq!(created, json!({ "_id": id, "product": "Widget", "price": 5 }));

    let uri = format!("/cart-items/{id}");
    let (status, fetched) = send_request(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, body) = send_request(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send_request(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Not Found" }));
}

#[tokio::test]
async fn test_create_ignores_client_id() {
    let app = create_test_app();

    let id = create(
        &app,
        json!({ "_id": MISSING_ID, "product": "Widget", "price": 5 }),
    )
    .await;

    assert_ne!(id, MISSING_ID);

    let (status, _) = send_request(&app, "GET", &format!("/cart-items/{MISSING_ID}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_returns_all_items() {
    let app = create_test_app();

    let (status, body) = send_request(&app, "GET", "/cart-items", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    create(&app, json!({ "product": "Widget", "price": 5 })).await;
    create(&app, json!({ "product": "Gadget", "price": 12 })).await;

    let (status, body) = send_request(&app, "GET", "/cart-items", None).await;
    assert_eq!(status, StatusCode::OK);

    let products: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["product"].as_str().unwrap())
        .collect();
    assert_eq!(products, ["Widget", "Gadget"]);
}

#[tokio::test]
async fn test_get_unknown_id_is_not_found() {
    let app = create_test_app();

    let (status, body) =
        send_request(&app, "GET", &format!("/cart-items/{MISSING_ID}"), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Not Found" }));
}

#[tokio::test]
async fn test_malformed_id_is_bad_request() {
    let app = create_test_app();

    for (method, body) in [
        ("GET", None),
        ("PUT", Some(json!({ "product": "Widget", "price": 5 }))),
        ("DELETE", None),
    ] {
        let (status, response) = send_request(&app, method, "/cart-items/not-an-id", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{method}");
        assert_eq!(response, json!({ "message": "Bad Request" }));
    }
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = create_test_app();

    let (status, body) =
        send_request(&app, "POST", "/cart-items", Some(json!({ "name": "Widget" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Bad Request" }));

    let (_, list) = send_request(&app, "GET", "/cart-items", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_replace_is_full_overwrite() {
    let app = create_test_app();

    let id = create(
        &app,
        json!({ "product": "Widget", "price": 5, "color": "blue" }),
    )
    .await;
    let uri = format!("/cart-items/{id}");

    let (status, replaced) = send_request(
        &app,
        "PUT",
        &uri,
        Some(json!({ "_id": MISSING_ID, "product": "Widget XL", "price": 7 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        replaced,
        json!({ "_id": id, "product": "Widget XL", "price": 7 })
    );

    let (status, fetched) = send_request(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, replaced);
    assert!(fetched.get("color").is_none());
}

#[tokio::test]
async fn test_replace_identical_document_succeeds() {
    let app = create_test_app();

    let id = create(&app, json!({ "product": "Widget", "price": 5 })).await;

    let (status, _) = send_request(
        &app,
        "PUT",
        &format!("/cart-items/{id}"),
        Some(json!({ "product": "Widget", "price": 5 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_replace_unknown_id_writes_nothing() {
    let app = create_test_app();

    let (status, body) = send_request(
        &app,
        "PUT",
        &format!("/cart-items/{MISSING_ID}"),
        Some(json!({ "product": "Widget", "price": 5 })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Not Found" }));

    let (_, list) = send_request(&app, "GET", "/cart-items", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_delete_twice_is_not_found() {
    let app = create_test_app();

    let id = create(&app, json!({ "product": "Widget", "price": 5 })).await;
    let uri = format!("/cart-items/{id}");

    let (status, _) = send_request(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send_request(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Not Found" }));
}

#[tokio::test]
async fn test_search_by_product_and_max_price() {
    let app = create_test_app();

    create(&app, json!({ "product": "Widget", "price": 5 })).await;
    create(&app, json!({ "product": "Widget", "price": 10 })).await;
    create(&app, json!({ "product": "Widget", "price": 15 })).await;
    create(&app, json!({ "product": "Gadget", "price": 3 })).await;

    let (status, body) = send_request(
        &app,
        "GET",
        "/cart-items/search?product=Widget&maxPrice=10",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    for item in items {
        assert_eq!(item["product"], "Widget");
        assert!(item["price"].as_f64().unwrap() <= 10.0);
    }
}

#[tokio::test]
async fn test_search_without_terms_returns_everything() {
    let app = create_test_app();

    create(&app, json!({ "product": "Widget", "price": 5 })).await;
    create(&app, json!({ "product": "Gadget", "price": 3 })).await;

    let (status, body) =
        send_request(&app, "GET", "/cart-items/search?product=&maxPrice=abc", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_search_page_size_filters_on_length() {
    let app = create_test_app();

    create(&app, json!({ "product": "Widget", "price": 5 })).await;
    create(&app, json!({ "product": "Rope", "price": 8, "length": 30 })).await;

    let (status, body) = send_request(&app, "GET", "/cart-items/search?pageSize=10", None).await;

    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["product"], "Rope");
}

#[tokio::test]
async fn test_search_repeated_key_is_joined() {
    let app = create_test_app();

    create(&app, json!({ "product": "a", "price": 1 })).await;
    create(&app, json!({ "product": "a,b", "price": 2 })).await;

    let (status, body) = send_request(
        &app,
        "GET",
        "/cart-items/search?product=a&product=b",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["product"], "a,b");
}

#[tokio::test]
async fn test_search_repeated_number_is_not_a_bound() {
    let app = create_test_app();

    create(&app, json!({ "product": "Widget", "price": 50 })).await;

    let (status, body) = send_request(
        &app,
        "GET",
        "/cart-items/search?maxPrice=5&maxPrice=6",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

/// Store whose every operation fails, as an unreachable database would.
struct UnreachableStore;

#[async_trait]
impl CartItemStore for UnreachableStore {
    async fn list(&self) -> Result<Vec<CartItem>, StoreError> {
        Err(StoreError::MissingId)
    }

    async fn search(&self, _filter: &SearchFilter) -> Result<Vec<CartItem>, StoreError> {
        Err(StoreError::MissingId)
    }

    async fn get(&self, _id: ObjectId) -> Result<Option<CartItem>, StoreError> {
        Err(StoreError::MissingId)
    }

    async fn create(&self, _item: CartItem) -> Result<CartItem, StoreError> {
        Err(StoreError::MissingId)
    }

    async fn replace(
        &self,
        _id: ObjectId,
        _item: CartItem,
    ) -> Result<Option<CartItem>, StoreError> {
        Err(StoreError::MissingId)
    }

    async fn delete(&self, _id: ObjectId) -> Result<bool, StoreError> {
        Err(StoreError::MissingId)
    }
}

#[tokio::test]
async fn test_store_fault_is_internal_server_error() {
    let app = create_app_router(Arc::new(AppState::new(UnreachableStore)));
    let item_uri = format!("/cart-items/{MISSING_ID}");
    let body = json!({ "product": "Widget", "price": 5 });

    for (method, uri, body) in [
        ("GET", "/cart-items", None),
        ("GET", "/cart-items/search?product=Widget", None),
        ("GET", item_uri.as_str(), None),
        ("POST", "/cart-items", Some(body.clone())),
        ("PUT", item_uri.as_str(), Some(body.clone())),
        ("DELETE", item_uri.as_str(), None),
    ] {
        let (status, response) = send_request(&app, method, uri, body).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
        assert_eq!(response, json!({ "message": "Internal Server Error" }));
    }
}

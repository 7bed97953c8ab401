//! API service integration tests using wiremock
//!
//! Verifies that the typed services in `src/api/` hit the documented
//! method and path for each operation, serialize request bodies the way
//! the backend expects, and decode the backend's response shapes.

use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stockroom::api::types::{BorrowRequest, CategoryPayload, ReturnRequest};
use stockroom::api::ApiClient;
use stockroom::auth::{Gateway, MemoryStore};
use stockroom::error::StockroomError;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Builds a client over a logged-in gateway pointed at the mock server.
fn make_client(server_uri: &str, store: Arc<MemoryStore>) -> ApiClient {
    let gateway = Gateway::new(
        url::Url::parse(server_uri).expect("mock server URL"),
        store,
        Duration::from_secs(5),
    );
    ApiClient::new(Arc::new(gateway))
}

fn logged_in_client(server_uri: &str) -> ApiClient {
    make_client(server_uri, Arc::new(MemoryStore::with_pair("tok", "ref")))
}

/// A minimal item in the backend's serializer shape.
fn sample_item() -> serde_json::Value {
    serde_json::json!({
        "id": 7,
        "name": "Projector",
        "description": "",
        "serial_number": "PRJ-0042",
        "category": "Electronics",
        "status": "available",
        "location": "Room 301",
        "owner": null,
        "purchase_date": null,
        "value": "1299.00",
        "created_at": "2023-05-12T08:30:00Z",
        "updated_at": "2024-01-03T16:45:12Z",
        "current_user": null
    })
}

/// A minimal usage record in the backend's serializer shape.
fn sample_usage(returned: bool) -> serde_json::Value {
    serde_json::json!({
        "id": 12,
        "item": 7,
        "item_name": "Projector",
        "item_serial": "PRJ-0042",
        "user": "bob",
        "borrower_contact": "x42",
        "start_time": "2024-02-01T10:00:00Z",
        "end_time": if returned { serde_json::json!("2024-02-02T10:00:00Z") } else { serde_json::Value::Null },
        "purpose": "demo",
        "notes": "",
        "is_returned": returned,
        "condition_before": "good",
        "condition_after": "",
        "expected_return_time": null,
        "created_at": "2024-02-01T10:00:00Z"
    })
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

/// Login POSTs the credentials to the token endpoint and persists both
/// halves of the returned pair.
#[tokio::test]
async fn test_login_persists_token_pair() {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryStore::new());

    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .and(body_json(serde_json::json!({
            "username": "alice",
            "password": "secret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access": "a",
            "refresh": "b"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = make_client(&server.uri(), Arc::clone(&store));
    client.auth().login("alice", "secret").await.expect("login");

    let snapshot = store.snapshot();
    assert_eq!(snapshot.access.as_deref(), Some("a"));
    assert_eq!(snapshot.refresh.as_deref(), Some("b"));
}

/// Logout clears both stored credentials.
#[tokio::test]
async fn test_logout_clears_credentials() {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryStore::with_pair("a", "b"));

    let client = make_client(&server.uri(), Arc::clone(&store));
    client.auth().logout().expect("logout");

    let snapshot = store.snapshot();
    assert!(snapshot.access.is_none());
    assert!(snapshot.refresh.is_none());
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_items_list_decodes_backend_shape() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/items/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([sample_item()])))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server.uri());
    let items = client.items().list().await.expect("list");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].serial_number, "PRJ-0042");
    assert_eq!(items[0].value.as_deref(), Some("1299.00"));
}

#[tokio::test]
async fn test_items_status_filters_hit_action_paths() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/items/available/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/items/in_use/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server.uri());
    assert!(client.items().available().await.expect("available").is_empty());
    assert!(client.items().in_use().await.expect("in_use").is_empty());
}

#[tokio::test]
async fn test_item_detail_includes_usage_history() {
    let server = MockServer::start().await;

    let mut detail = sample_item();
    detail["usage_history"] = serde_json::json!([sample_usage(true)]);

    Mock::given(method("GET"))
        .and(path("/api/items/7/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server.uri());
    let detail = client.items().detail(7).await.expect("detail");
    assert_eq!(detail.item.id, 7);
    assert_eq!(detail.usage_history.len(), 1);
    assert!(detail.usage_history[0].is_returned);
}

/// Borrow POSTs to the item's action path with exactly the fields set.
#[tokio::test]
async fn test_borrow_posts_to_action_path() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/items/7/borrow/"))
        .and(body_json(serde_json::json!({
            "user_name": "bob",
            "purpose": "demo"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_usage(false)))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server.uri());
    let mut request = BorrowRequest::for_user("bob");
    request.purpose = Some("demo".to_string());

    let usage = client.items().borrow(7, &request).await.expect("borrow");
    assert_eq!(usage.id, 12);
    assert!(!usage.is_returned);
}

#[tokio::test]
async fn test_return_item_posts_to_action_path() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/items/7/return_item/"))
        .and(body_json(serde_json::json!({ "condition_after": "scratched" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_usage(true)))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server.uri());
    let request = ReturnRequest {
        condition_after: Some("scratched".to_string()),
        return_notes: None,
    };

    let usage = client.items().return_item(7, &request).await.expect("return");
    assert!(usage.is_returned);
}

#[tokio::test]
async fn test_delete_item_accepts_no_content() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/items/9/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server.uri());
    client.items().delete(9).await.expect("delete");
}

#[tokio::test]
async fn test_upload_image_posts_multipart_form() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/item-images/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 1,
            "item": 3
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server.uri());
    client
        .items()
        .upload_image(3, "photo.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF])
        .await
        .expect("upload");
}

// ---------------------------------------------------------------------------
// Usages, categories, users
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_usages_current_hits_action_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/usages/current/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([sample_usage(false)])))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server.uri());
    let usages = client.usages().current().await.expect("current");
    assert_eq!(usages.len(), 1);
    assert!(!usages[0].is_returned);
}

#[tokio::test]
async fn test_usages_by_user_sends_query_param() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/usages/by_user/"))
        .and(query_param("user_name", "alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server.uri());
    let usages = client.usages().by_user("alice").await.expect("by_user");
    assert!(usages.is_empty());
}

#[tokio::test]
async fn test_categories_use_item_categories_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/item_categories/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": 1,
            "name": "Electronics",
            "description": "",
            "created_at": "2023-01-01T00:00:00Z"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/item_categories/"))
        .and(body_json(serde_json::json!({ "name": "Furniture" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 2,
            "name": "Furniture",
            "description": "",
            "created_at": "2023-01-01T00:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server.uri());

    let categories = client.categories().list().await.expect("list");
    assert_eq!(categories[0].name, "Electronics");

    let created = client
        .categories()
        .create(&CategoryPayload {
            name: "Furniture".to_string(),
            description: None,
        })
        .await
        .expect("create");
    assert_eq!(created.id, 2);
}

#[tokio::test]
async fn test_users_list_decodes_accounts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": 1,
            "username": "alice",
            "first_name": "Alice",
            "last_name": "Liddell",
            "email": "alice@example.com"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server.uri());
    let users = client.users().list().await.expect("list");
    assert_eq!(users[0].username, "alice");
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

/// Non-401 backend failures surface as a Backend error carrying the
/// status and body.
#[tokio::test]
async fn test_backend_error_carries_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/items/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server.uri());
    let err = client.items().list().await.expect_err("backend error");

    match err.downcast_ref::<StockroomError>() {
        Some(StockroomError::Backend { status, message }) => {
            assert_eq!(*status, 500);
            assert!(message.contains("boom"), "body preserved: {message}");
        }
        other => panic!("expected Backend error, got {other:?}"),
    }
}

/// A 400 from the borrow action (item unavailable) is passed through,
/// not retried.
#[tokio::test]
async fn test_borrow_rejection_passes_through() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/items/7/borrow/"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({ "error": "item unavailable" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = logged_in_client(&server.uri());
    let err = client
        .items()
        .borrow(7, &BorrowRequest::for_user("bob"))
        .await
        .expect_err("borrow rejected");

    match err.downcast_ref::<StockroomError>() {
        Some(StockroomError::Backend { status, .. }) => assert_eq!(*status, 400),
        other => panic!("expected Backend error, got {other:?}"),
    }
}

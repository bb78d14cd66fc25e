use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use bacheca_core::Message;
use bacheca_server::{
    connect_pool, routes::router, run_migrations, sqlite_url_for_path, AppState, InMemoryStore, MessageStore,
    SqliteStore, StoreError,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

fn app_with(store: Arc<dyn MessageStore>) -> Router {
    router(Arc::new(AppState::new(store, "test-host")))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn texts(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|m| m["message"].as_str().expect("message string").to_string())
        .collect()
}

/// Store che conta le chiamate e fallisce sempre.
#[derive(Default)]
struct FailingStore {
    calls: AtomicUsize,
}

#[async_trait]
impl MessageStore for FailingStore {
    async fn find_all(&self) -> Result<Vec<Message>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Unavailable("connection lost".to_string()))
    }

    async fn create(&self, _text: &str) -> Result<Message, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Unavailable("connection lost".to_string()))
    }

    async fn delete_all(&self) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Unavailable("connection lost".to_string()))
    }

    async fn health(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection lost".to_string()))
    }
}

/// Store in memoria la cui `create` fallisce, per verificare che non resti nulla di parziale.
#[derive(Default)]
struct CreateFailsStore {
    inner: InMemoryStore,
}

#[async_trait]
impl MessageStore for CreateFailsStore {
    async fn find_all(&self) -> Result<Vec<Message>, StoreError> {
        self.inner.find_all().await
    }

    async fn create(&self, _text: &str) -> Result<Message, StoreError> {
        Err(StoreError::Corrupt("constraint violation".to_string()))
    }

    async fn delete_all(&self) -> Result<(), StoreError> {
        self.inner.delete_all().await
    }
}

#[tokio::test]
async fn hello_reports_hostname() {
    let app = app_with(Arc::new(InMemoryStore::new()));

    let (status, body) = send(&app, Method::GET, "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Hello World", "hostname": "test-host" }));
}

#[tokio::test]
async fn full_scenario_on_empty_store() {
    let app = app_with(Arc::new(InMemoryStore::new()));

    let (status, body) = send(&app, Method::GET, "/messages", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "data": [] }));

    let (status, body) = send(&app, Method::POST, "/messages", Some(json!({ "message": "Hello World" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(texts(&body), vec!["Hello World"]);
    let created_id = body["data"][0]["id"].as_str().expect("server assigns an id").to_string();

    let (_, body) = send(&app, Method::GET, "/messages", None).await;
    assert_eq!(texts(&body), vec!["Hello World"]);
    assert_eq!(body["data"][0]["id"], created_id.as_str());

    let (status, body) = send(&app, Method::DELETE, "/messages", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "data": [] }));

    let (_, body) = send(&app, Method::GET, "/messages", None).await;
    assert_eq!(body, json!({ "data": [] }));
}

#[tokio::test]
async fn delete_all_is_idempotent() {
    let app = app_with(Arc::new(InMemoryStore::new()));
    send(&app, Method::POST, "/messages", Some(json!({ "message": "x" }))).await;

    for _ in 0..2 {
        let (status, body) = send(&app, Method::DELETE, "/messages", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "data": [] }));
    }
    let (_, body) = send(&app, Method::GET, "/messages", None).await;
    assert!(texts(&body).is_empty());
}

#[tokio::test]
async fn listing_preserves_creation_order() {
    let app = app_with(Arc::new(InMemoryStore::new()));
    for text in ["a", "b", "c"] {
        send(&app, Method::POST, "/messages", Some(json!({ "message": text }))).await;
    }

    let (_, body) = send(&app, Method::GET, "/messages", None).await;
    assert_eq!(texts(&body), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn empty_text_is_accepted() {
    let app = app_with(Arc::new(InMemoryStore::new()));

    let (status, body) = send(&app, Method::POST, "/messages", Some(json!({ "message": "" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(texts(&body), vec![""]);
}

#[tokio::test]
async fn malformed_create_payloads_are_validation_errors() {
    let store = Arc::new(InMemoryStore::new());
    let app = app_with(store.clone());

    for payload in [json!({}), json!({ "message": 42 }), json!({ "message": null }), json!("hi")] {
        let (status, body) = send(&app, Method::POST, "/messages", Some(payload.clone())).await;
        assert_eq!(status, StatusCode::OK, "payload {}", payload);
        assert_eq!(body["error"]["code"], "validation_error", "payload {}", payload);
        assert!(body.get("data").is_none());
    }

    // corpo non JSON e content-type mancante
    let request = Request::builder()
        .method(Method::POST)
        .uri("/messages")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["code"], "validation_error");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/messages")
        .body(Body::from(r#"{"message":"hi"}"#))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["code"], "validation_error");

    assert!(store.is_empty(), "validation failures must not reach the store");
}

#[tokio::test]
async fn store_failures_are_reported_in_band() {
    let store = Arc::new(FailingStore::default());
    let app = app_with(store.clone());

    let (status, body) = send(&app, Method::GET, "/messages", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"]["code"], "store_error");
    assert!(body["error"]["message"].as_str().unwrap().contains("connection lost"));

    let (status, body) = send(&app, Method::POST, "/messages", Some(json!({ "message": "hi" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"]["code"], "store_error");

    let (status, body) = send(&app, Method::DELETE, "/messages", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"]["code"], "store_error");

    // una sola chiamata allo store per operazione, niente retry
    assert_eq!(store.calls.load(Ordering::SeqCst), 3);

    // il processo è ancora in piedi
    let (status, _) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn failed_create_leaves_no_partial_message() {
    let app = app_with(Arc::new(CreateFailsStore::default()));

    let (_, body) = send(&app, Method::POST, "/messages", Some(json!({ "message": "hi" }))).await;
    assert_eq!(body["error"]["code"], "store_error");

    let (_, body) = send(&app, Method::GET, "/messages", None).await;
    assert_eq!(body, json!({ "data": [] }));
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let app = app_with(Arc::new(InMemoryStore::new()));

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/messages")
        .header(header::ORIGIN, "http://localhost:3001")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );

    let request = Request::builder()
        .method(Method::GET)
        .uri("/messages")
        .header(header::ORIGIN, "http://example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

#[tokio::test]
async fn sqlite_backed_round_trip() {
    let td = TempDir::new().unwrap();
    let url = sqlite_url_for_path(&td.path().join("api.db")).unwrap();
    let pool = connect_pool(&url).await.unwrap();
    run_migrations(&pool).await.unwrap();
    let app = app_with(Arc::new(SqliteStore::new(pool)));

    let (_, body) = send(&app, Method::POST, "/messages", Some(json!({ "message": "hi" }))).await;
    assert_eq!(texts(&body), vec!["hi"]);

    let (_, body) = send(&app, Method::GET, "/messages", None).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["message"], "hi");
    assert!(data[0]["createdAt"].is_string());

    let (_, body) = send(&app, Method::DELETE, "/messages", None).await;
    assert_eq!(body, json!({ "data": [] }));
    let (_, body) = send(&app, Method::GET, "/messages", None).await;
    assert_eq!(body, json!({ "data": [] }));
}

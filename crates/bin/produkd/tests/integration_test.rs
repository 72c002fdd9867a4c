//! End-to-end smoke tests for the full produkd stack.
//!
//! Each test spins up the complete application (real repository, real
//! service, real axum router) and exercises the HTTP layer via
//! `tower::ServiceExt::oneshot`, so no TCP port is bound. Every scenario runs
//! against both the in-memory `SQLite` database and the volatile adapter.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use produk_adapter_http_axum::router;
use produk_adapter_http_axum::state::AppState;
use produk_adapter_storage_memory::InMemoryProductRepository;
use produk_adapter_storage_sqlite_sqlx::{Config, SqliteProductRepository};
use produk_app::services::product_service::ProductService;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Build a fully-wired router backed by an in-memory `SQLite` database.
async fn sqlite_app() -> axum::Router {
    let db = Config::new("sqlite::memory:")
        .build()
        .await
        .expect("in-memory database should initialise");

    let repo = SqliteProductRepository::new(db.pool().clone());
    router::build(AppState::new(ProductService::new(repo)))
}

/// Build a fully-wired router backed by the volatile adapter.
fn memory_app() -> axum::Router {
    router::build(AppState::new(ProductService::new(
        InMemoryProductRepository::new(),
    )))
}

async fn apps() -> [(&'static str, axum::Router); 2] {
    [("sqlite", sqlite_app().await), ("memory", memory_app())]
}

async fn call(
    app: &axum::Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let resp = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn call_json(
    app: &axum::Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let (status, bytes) = call(app, method, uri, body).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    for (backend, app) in apps().await {
        let (status, body) = call(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK, "{backend}");
        assert_eq!(body, b"OK", "{backend}");

        let (status, _) = call(&app, Method::POST, "/health", None).await;
        assert_eq!(status, StatusCode::OK, "{backend}");
    }
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_create_fetch_and_delete_product() {
    for (backend, app) in apps().await {
        let (status, created) = call_json(
            &app,
            Method::POST,
            "/api/produk",
            Some(json!({"name": "Widget", "price": 1000, "stock": 5})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{backend}");
        assert_eq!(created["id"], 1, "{backend}");
        assert_eq!(created["name"], "Widget", "{backend}");
        assert_eq!(created["price"], 1000, "{backend}");
        assert_eq!(created["stock"], 5, "{backend}");
        assert!(created["created_at"].is_string(), "{backend}");

        let (status, fetched) = call_json(&app, Method::GET, "/api/produk/1", None).await;
        assert_eq!(status, StatusCode::OK, "{backend}");
        assert_eq!(fetched, created, "{backend}");

        let (status, deleted) = call_json(&app, Method::DELETE, "/api/produk/1", None).await;
        assert_eq!(status, StatusCode::OK, "{backend}");
        assert_eq!(deleted["message"], "product deleted", "{backend}");

        let (status, _) = call(&app, Method::GET, "/api/produk/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{backend}");
    }
}

#[tokio::test]
async fn should_list_products_newest_first_and_track_deletes() {
    for (backend, app) in apps().await {
        for name in ["First", "Second", "Third"] {
            let (status, _) = call(
                &app,
                Method::POST,
                "/api/produk",
                Some(json!({"name": name, "price": 1, "stock": 1})),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED, "{backend}");
        }
        call(&app, Method::DELETE, "/api/produk/2", None).await;

        let (status, list) = call_json(&app, Method::GET, "/api/produk", None).await;
        assert_eq!(status, StatusCode::OK, "{backend}");
        let names: Vec<&str> = list
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Third", "First"], "{backend}");
    }
}

#[tokio::test]
async fn should_replace_product_and_preserve_identity() {
    for (backend, app) in apps().await {
        let (_, created) = call_json(
            &app,
            Method::POST,
            "/api/produk",
            Some(json!({"name": "Widget", "price": 1000, "stock": 5})),
        )
        .await;

        let (status, updated) = call_json(
            &app,
            Method::PUT,
            "/api/produk/1",
            Some(json!({"nama": "Kopi", "harga": 15000, "stok": 20})),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{backend}");
        assert_eq!(updated["id"], created["id"], "{backend}");
        assert_eq!(updated["created_at"], created["created_at"], "{backend}");
        assert_eq!(updated["name"], "Kopi", "{backend}");
        assert_eq!(updated["price"], 15000, "{backend}");
        assert_eq!(updated["stock"], 20, "{backend}");

        let (_, fetched) = call_json(&app, Method::GET, "/api/produk/1", None).await;
        assert_eq!(fetched, updated, "{backend}");
    }
}

#[tokio::test]
async fn should_reject_bad_input_without_touching_storage() {
    for (backend, app) in apps().await {
        let (status, _) = call(&app, Method::GET, "/api/produk/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{backend}");

        let (status, _) = call(&app, Method::GET, "/api/produk/", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{backend}");

        let (status, _) = call(&app, Method::GET, "/api/produk/1/extra", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{backend}");

        let (status, _) = call(&app, Method::POST, "/api/produk/abc", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{backend}");

        let (status, _) = call(
            &app,
            Method::POST,
            "/api/produk",
            Some(json!({"name": "Widget", "price": "a lot"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{backend}");

        let (status, _) = call(
            &app,
            Method::PUT,
            "/api/produk/1",
            Some(json!({"name": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{backend}");

        let (_, list) = call_json(&app, Method::GET, "/api/produk", None).await;
        assert_eq!(list, json!([]), "{backend}");
    }
}

#[tokio::test]
async fn should_return_not_found_for_missing_product() {
    for (backend, app) in apps().await {
        let (status, body) = call_json(
            &app,
            Method::PUT,
            "/api/produk/42",
            Some(json!({"name": "Ghost", "price": 1, "stock": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{backend}");
        assert_eq!(body["error"], "Product 42 not found", "{backend}");

        let (status, _) = call(&app, Method::DELETE, "/api/produk/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{backend}");
    }
}

#[tokio::test]
async fn should_return_method_not_allowed_for_unsupported_verbs() {
    for (backend, app) in apps().await {
        let (status, body) = call(&app, Method::PATCH, "/api/produk", None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{backend}");
        assert!(body.is_empty(), "{backend}");
    }
}

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use sketchbook_api::config::ServerConfig;
use sketchbook_api::router::build_app_router;
use sketchbook_api::state::AppState;
use sketchbook_db::{Store, WriteMode, WriteModeSetting};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:3000` as CORS origin (matching the dev default)
/// and a small body limit so oversize handling is cheap to exercise.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        max_body_bytes: 64 * 1024,
        db_max_connections: 5,
        write_mode: WriteModeSetting::Force(WriteMode::Atomic),
    }
}

/// Build the full application router over `pool` with atomic writes.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_mode(pool, WriteMode::Atomic)
}

/// Build the full application router with a fixed write strategy.
///
/// Uses the same [`build_app_router`] as `main.rs`, so tests exercise the
/// production middleware stack.
pub fn build_test_app_with_mode(pool: PgPool, mode: WriteMode) -> Router {
    let config = test_config();
    let state = AppState {
        store: Store::with_write_mode(pool, mode),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, Body::empty(), false).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Body::from(body.to_string()), true).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Body::from(body.to_string()), true).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Body::empty(), false).await
}

/// Send a raw body with a JSON content type.
pub async fn post_raw(app: Router, uri: &str, body: impl Into<Body>) -> Response<Body> {
    send(app, Method::POST, uri, body.into(), true).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: Router, method: Method, uri: &str, body: Body, json: bool) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if json {
        builder = builder.header("content-type", "application/json");
    }
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

/// Create a lookup through the API and return its id.
pub async fn create_lookup(pool: &PgPool, kind: &str, body: serde_json::Value) -> i64 {
    let app = build_test_app(pool.clone());
    let response = post_json(app, &format!("/api/lookups/{kind}"), body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

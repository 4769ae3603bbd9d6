// Router-level helpers for handler tests.
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use crate::{
    config::Config, db::memorydb::MemoryStore, routes::create_router, utils::token::create_token,
    AppState,
};

pub const TEST_SECRET: &str = "handler-test-secret";

pub fn test_config() -> Config {
    Config {
        database_url: String::new(),
        jwt_secret: TEST_SECRET.to_string(),
        port: 0,
        query_timeout_secs: 1,
        db_max_connections: 1,
        allowed_origins: vec![],
    }
}

pub fn test_app(store: Arc<MemoryStore>) -> Router {
    create_router(Arc::new(AppState::new(store, test_config())))
}

pub fn bearer(user_id: Uuid) -> String {
    let token = create_token(&user_id.to_string(), TEST_SECRET.as_bytes(), 3600).unwrap();
    format!("Bearer {}", token)
}

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    user_id: Option<Uuid>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user_id) = user_id {
        builder = builder.header(header::AUTHORIZATION, bearer(user_id));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

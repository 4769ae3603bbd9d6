use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        categories::categories_handler, jobs::jobs_handler, profile::profile_handler,
        workers::workers_handler,
    },
    middleware::identity,
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Every page route resolves the caller's identity; anonymous is allowed.
    let api_route = Router::new()
        .merge(categories_handler())
        .merge(jobs_handler())
        .merge(workers_handler())
        .merge(profile_handler())
        .layer(middleware::from_fn(identity))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
}

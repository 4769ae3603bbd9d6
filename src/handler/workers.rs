use std::sync::Arc;

use axum::{extract::Query, response::IntoResponse, routing::get, Extension, Json, Router};

use crate::{
    dtos::{
        commondtos::ApiResponse,
        workerdtos::{WorkerDirectoryDto, WorkerDirectoryQueryDto},
    },
    error::HttpError,
    AppState,
};

pub fn workers_handler() -> Router {
    Router::new().route("/workers", get(get_workers))
}

pub async fn get_workers(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<WorkerDirectoryQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let scope = query.scope()?;
    let directory = &app_state.worker_directory_service;

    let listing = directory
        .load_directory(scope, query.search.as_deref().unwrap_or_default())
        .await;

    // The heading prefers the label the link carried; otherwise look it up.
    let category_name = match query.label() {
        Some(name) => Some(name.to_string()),
        None => match directory.scope_category(scope).await {
            Ok(category) => category.map(|c| c.name),
            Err(e) => {
                tracing::warn!("category lookup for heading failed: {}", e);
                None
            }
        },
    };

    Ok(Json(ApiResponse::success(
        "Workers retrieved successfully",
        WorkerDirectoryDto::new(&listing, category_name.as_deref()),
    )))
}

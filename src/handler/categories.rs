use std::sync::Arc;

use axum::{response::IntoResponse, routing::get, Extension, Json, Router};

use crate::{
    dtos::commondtos::{ApiResponse, CategoryDto},
    error::HttpError,
    AppState,
};

pub fn categories_handler() -> Router {
    Router::new().route("/categories", get(get_categories))
}

pub async fn get_categories(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let categories = app_state.job_board_service.categories().await?;

    Ok(Json(ApiResponse::success(
        "Categories retrieved successfully",
        CategoryDto::from_categories(&categories),
    )))
}

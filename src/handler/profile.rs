use std::sync::Arc;

use axum::{response::IntoResponse, routing::get, Extension, Json, Router};

use crate::{
    dtos::{commondtos::ApiResponse, profiledtos::ProfilePageDto},
    error::HttpError,
    middleware::Identity,
    service::forms::ProfileForm,
    AppState,
};

pub fn profile_handler() -> Router {
    Router::new().route("/profile", get(get_profile).put(update_profile))
}

pub async fn get_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse, HttpError> {
    let page = app_state.profile_service.load_form(identity).await?;

    Ok(Json(ApiResponse::success(
        "Profile retrieved successfully",
        ProfilePageDto::from(page),
    )))
}

pub async fn update_profile(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<ProfileForm>,
) -> Result<impl IntoResponse, HttpError> {
    let submission = app_state.profile_service.submit(identity, body).await?;
    let message = submission.notice.description.clone();

    Ok(Json(ApiResponse::success(&message, submission)))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use uuid::Uuid;

    use crate::db::memorydb::MemoryStore;
    use crate::handler::testutil::{send, test_app};

    #[tokio::test]
    async fn test_profile_requires_login() {
        let app = test_app(Arc::new(MemoryStore::seeded()));
        let (status, body) = send(app, Method::GET, "/api/profile", None, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["redirect"], "/auth");
    }

    #[tokio::test]
    async fn test_new_account_gets_default_form() {
        let app = test_app(Arc::new(MemoryStore::seeded()));
        let (status, body) = send(app, Method::GET, "/api/profile", Some(Uuid::new_v4()), None).await;

        assert_eq!(status, StatusCode::OK);
        let data = &body["data"];
        assert_eq!(data["registered_as_worker"], false);
        assert_eq!(data["form"]["available"], true);
        assert_eq!(data["form"]["hourly_rate"], "");
        assert_eq!(data["categories"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_opt_in_without_category_keeps_basic_profile() {
        let store = Arc::new(MemoryStore::seeded());
        let me = Uuid::new_v4();
        let body = json!({ "full_name": "Asha Rao", "is_worker": true, "skills": "Tiling" });

        let (status, response) = send(test_app(store.clone()), Method::PUT, "/api/profile", Some(me), Some(body)).await;

        assert_eq!(status, StatusCode::OK);
        let data = &response["data"];
        assert_eq!(data["worker"]["result"], "rejected");
        assert_eq!(data["notice"]["variant"], "destructive");
        assert_eq!(response["message"], "Please select a category for your worker profile");
        assert_eq!(store.profiles().len(), 1);
        assert_eq!(store.worker_writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_worker_profile_saved_and_reloaded() {
        let store = Arc::new(MemoryStore::seeded());
        let me = Uuid::new_v4();
        let body = json!({
            "full_name": "Asha Rao",
            "username": "asha",
            "is_worker": true,
            "category_id": 2,
            "hourly_rate": "30",
            "years_experience": "",
            "skills": "Wiring, Lighting",
            "location": "Pune"
        });

        let (status, response) = send(test_app(store.clone()), Method::PUT, "/api/profile", Some(me), Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response["data"]["worker"]["result"], "saved");

        let (_, page) = send(test_app(store), Method::GET, "/api/profile", Some(me), None).await;
        let form = &page["data"]["form"];
        assert_eq!(page["data"]["registered_as_worker"], true);
        assert_eq!(form["skills"], "Wiring, Lighting");
        assert_eq!(form["hourly_rate"], "30");
        assert_eq!(form["years_experience"], "");
    }

    #[tokio::test]
    async fn test_non_numeric_rate_is_bad_request() {
        let store = Arc::new(MemoryStore::seeded());
        let body = json!({ "is_worker": true, "category_id": 2, "hourly_rate": "lots" });

        let (status, response) = send(test_app(store.clone()), Method::PUT, "/api/profile", Some(Uuid::new_v4()), Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["message"], "Hourly rate must be a number");
        assert!(store.profiles().is_empty());
    }
}

use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::{
    dtos::{
        commondtos::{ApiResponse, CategoryDto},
        jobdtos::{JobBoardDto, JobBoardQueryDto, JobDto},
    },
    error::HttpError,
    middleware::Identity,
    service::{
        error::{ServiceError, AUTH_PATH},
        forms::JobForm,
        outcome::Outcome,
    },
    AppState,
};

pub fn jobs_handler() -> Router {
    Router::new()
        .route("/jobs", get(get_job_board).post(post_job))
        .route("/jobs/:job_id/apply", post(apply_for_job))
        .route("/post-job", get(get_post_job_form))
}

// Identity-gated actions each tell the visitor what they need to log in for.
fn login_for(message: &'static str) -> impl Fn(ServiceError) -> HttpError {
    move |error| match error {
        ServiceError::AuthenticationRequired => {
            HttpError::unauthorized(message).with_redirect(AUTH_PATH)
        }
        other => HttpError::from(other),
    }
}

pub async fn get_job_board(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<JobBoardQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let (partition, filters) = query.parse()?;
    let board = &app_state.job_board_service;

    let (listing, categories) = tokio::join!(
        board.load_board(identity, partition, filters),
        board.categories(),
    );

    let categories = match categories {
        Ok(categories) => CategoryDto::from_categories(&categories),
        Err(e) => {
            tracing::warn!("category filter options unavailable: {}", e);
            Vec::new()
        }
    };

    Ok(Json(ApiResponse::success(
        "Jobs retrieved successfully",
        JobBoardDto::new(&listing, categories),
    )))
}

pub async fn get_post_job_form(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<impl IntoResponse, HttpError> {
    let categories = app_state
        .job_posting_service
        .load_form(identity)
        .await
        .map_err(login_for("Please log in to post a job"))?;

    Ok(Json(ApiResponse::success(
        "Categories retrieved successfully",
        CategoryDto::from_categories(&categories),
    )))
}

pub async fn post_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<JobForm>,
) -> Result<impl IntoResponse, HttpError> {
    let outcome = app_state
        .job_posting_service
        .submit(identity, body)
        .await
        .map_err(login_for("Please log in to post a job"))?;

    let response = Outcome {
        data: JobDto::from(&outcome.data),
        notice: outcome.notice,
        navigation: outcome.navigation,
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Your job has been successfully posted", response)),
    ))
}

pub async fn apply_for_job(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let outcome = app_state
        .job_board_service
        .apply_for_job(identity, job_id)
        .await
        .map_err(login_for("Please log in to apply for this job"))?;

    Ok(Json(ApiResponse::success(
        "Your interest has been registered for this job",
        outcome,
    )))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    use axum::http::{Method, StatusCode};
    use chrono::{Duration, Utc};
    use serde_json::json;
    use uuid::Uuid;

    use crate::db::memorydb::{job_fixture, worker_fixture, MemoryStore};
    use crate::handler::testutil::{send, test_app};
    use crate::models::jobmodel::JobStatus;

    fn store_with_jobs(me: Uuid) -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::seeded());
        let asha = Uuid::new_v4();
        store.add_profile(asha, "Asha Rao", "asha");
        let now = Utc::now();
        store.add_job(job_fixture(asha, "Paint fence", 1, JobStatus::Open, now));
        store.add_job(job_fixture(asha, "Rewire hall", 2, JobStatus::Completed, now - Duration::hours(1)));
        store.add_job(job_fixture(me, "Fix tap", 3, JobStatus::Open, now - Duration::hours(2)));
        store
    }

    #[tokio::test]
    async fn test_anonymous_board() {
        let app = test_app(store_with_jobs(Uuid::new_v4()));
        let (status, body) = send(app, Method::GET, "/api/jobs", None, None).await;

        assert_eq!(status, StatusCode::OK);
        let data = &body["data"];
        assert_eq!(data["active"], "all");
        assert_eq!(data["listing"]["state"], "ready");
        assert_eq!(data["listing"]["items"].as_array().unwrap().len(), 3);
        assert_eq!(data["listing"]["items"][0]["client"]["name"], "Asha Rao");
        assert_eq!(data["listing"]["items"][1]["apply"]["label"], "Not Available");
        assert_eq!(data["tabs"][1]["enabled"], false);
        assert_eq!(data["categories"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_anonymous_my_jobs_asks_for_login() {
        let app = test_app(store_with_jobs(Uuid::new_v4()));
        let (status, body) = send(app, Method::GET, "/api/jobs?tab=my-jobs", None, None).await;

        assert_eq!(status, StatusCode::OK);
        let listing = &body["data"]["listing"];
        assert_eq!(listing["state"], "login_required");
        assert_eq!(listing["message"], "Please log in to view your jobs");
        assert_eq!(listing["login"]["path"], "/auth");
    }

    #[tokio::test]
    async fn test_authenticated_board_partitions_and_filters() {
        let me = Uuid::new_v4();
        let store = store_with_jobs(me);

        let (_, body) = send(test_app(store.clone()), Method::GET, "/api/jobs?tab=mine", Some(me), None).await;
        let items = body["data"]["listing"]["items"].as_array().unwrap().clone();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["title"], "Fix tap");

        let (_, body) = send(
            test_app(store.clone()),
            Method::GET,
            "/api/jobs?tab=all&search=PAINT&status=_all&category=1",
            Some(me),
            None,
        )
        .await;
        let items = body["data"]["listing"]["items"].as_array().unwrap().clone();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["title"], "Paint fence");

        let (_, body) = send(test_app(store), Method::GET, "/api/jobs?tab=assigned-jobs", Some(me), None).await;
        let listing = &body["data"]["listing"];
        assert_eq!(listing["items"].as_array().unwrap().len(), 0);
        assert_eq!(listing["empty_message"], "No jobs are currently assigned to you");
    }

    #[tokio::test]
    async fn test_unknown_status_filter_is_rejected() {
        let app = test_app(store_with_jobs(Uuid::new_v4()));
        let (status, body) = send(app, Method::GET, "/api/jobs?status=pending", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "fail");
    }

    #[tokio::test]
    async fn test_invalid_token_is_rejected() {
        let app = test_app(store_with_jobs(Uuid::new_v4()));
        let request = axum::http::Request::builder()
            .uri("/api/jobs")
            .header("Authorization", "Bearer not-a-token")
            .body(axum::body::Body::empty())
            .unwrap();
        let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_post_job_creates_open_job() {
        let me = Uuid::new_v4();
        let store = Arc::new(MemoryStore::seeded());
        let body = json!({
            "title": "Fix tap",
            "description": "Kitchen tap drips",
            "category_id": 3,
            "budget": "",
            "location": "Pune"
        });

        let (status, response) = send(test_app(store.clone()), Method::POST, "/api/jobs", Some(me), Some(body)).await;

        assert_eq!(status, StatusCode::CREATED);
        let data = &response["data"];
        assert_eq!(data["data"]["status"], "open");
        assert_eq!(data["data"]["client_id"], me.to_string());
        assert!(data["data"]["budget"].is_null());
        assert!(data["data"]["worker_id"].is_null());
        assert_eq!(data["notice"]["title"], "Job posted");
        assert_eq!(data["navigation"]["path"], "/jobs");
        assert_eq!(store.jobs().len(), 1);
    }

    #[tokio::test]
    async fn test_post_job_missing_title_writes_nothing() {
        let store = Arc::new(MemoryStore::seeded());
        let body = json!({ "title": "", "description": "Kitchen tap drips", "category_id": 3 });

        let (status, response) = send(test_app(store.clone()), Method::POST, "/api/jobs", Some(Uuid::new_v4()), Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["message"], "Please fill all required fields");
        assert_eq!(store.job_writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_post_job_form_requires_login() {
        let app = test_app(Arc::new(MemoryStore::seeded()));
        let (status, body) = send(app, Method::GET, "/api/post-job", None, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Please log in to post a job");
        assert_eq!(body["redirect"], "/auth");
    }

    #[tokio::test]
    async fn test_anonymous_apply_redirects_to_auth() {
        let store = store_with_jobs(Uuid::new_v4());
        let job_id = store.jobs()[0].id;
        let uri = format!("/api/jobs/{}/apply", job_id);

        let (status, body) = send(test_app(store.clone()), Method::POST, &uri, None, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Please log in to apply for this job");
        assert_eq!(body["redirect"], "/auth");
        assert_eq!(store.worker_lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_apply_without_worker_profile_redirects_to_profile() {
        let store = store_with_jobs(Uuid::new_v4());
        let job_id = store.jobs()[0].id;
        let uri = format!("/api/jobs/{}/apply", job_id);

        let (status, body) = send(test_app(store), Method::POST, &uri, Some(Uuid::new_v4()), None).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["redirect"], "/profile");
    }

    #[tokio::test]
    async fn test_worker_applies_to_open_job() {
        let me = Uuid::new_v4();
        let store = store_with_jobs(Uuid::new_v4());
        store.add_worker(worker_fixture(me, 1, &["Painting"]));
        let job_id = store.jobs()[0].id;
        let uri = format!("/api/jobs/{}/apply", job_id);

        let (status, body) = send(test_app(store.clone()), Method::POST, &uri, Some(me), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["notice"]["title"], "Application sent");
        assert_eq!(store.job_writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_apply_to_closed_job_conflicts() {
        let me = Uuid::new_v4();
        let store = store_with_jobs(Uuid::new_v4());
        store.add_worker(worker_fixture(me, 2, &["Wiring"]));
        let closed = store
            .jobs()
            .into_iter()
            .find(|j| j.status == JobStatus::Completed)
            .unwrap();
        let uri = format!("/api/jobs/{}/apply", closed.id);

        let (status, _) = send(test_app(store), Method::POST, &uri, Some(me), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_own_job_is_managed_not_applied_to() {
        let me = Uuid::new_v4();
        let store = store_with_jobs(me);
        store.add_worker(worker_fixture(me, 3, &["Pipes"]));

        let (_, body) = send(test_app(store.clone()), Method::GET, "/api/jobs?tab=mine", Some(me), None).await;
        let apply = &body["data"]["listing"]["items"][0]["apply"];
        assert_eq!(apply["action"], "manage");
        assert_eq!(apply["label"], "Manage Job");

        let own = store.jobs().into_iter().find(|j| j.client_id == me).unwrap();
        let uri = format!("/api/jobs/{}/apply", own.id);
        let (status, body) = send(test_app(store.clone()), Method::POST, &uri, Some(me), None).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], "You cannot apply to your own job");
        assert_eq!(store.job_writes.load(Ordering::SeqCst), 0);
    }
}

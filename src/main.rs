mod config;
mod db;
mod dtos;
mod error;
mod handler;
mod middleware;
mod models;
mod routes;
mod service;
mod utils;

use std::sync::Arc;

use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use config::Config;
use db::{DBClient, MarketplaceStore};
use dotenv::dotenv;
use routes::create_router;
use service::{
    job_board_service::JobBoardService, job_posting_service::JobPostingService,
    profile_service::ProfileService, worker_directory_service::WorkerDirectoryService,
};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::filter::LevelFilter;

#[derive(Debug, Clone)]
pub struct AppState {
    pub env: Config,
    pub db_client: Arc<dyn MarketplaceStore>,
    pub job_board_service: Arc<JobBoardService>,
    pub worker_directory_service: Arc<WorkerDirectoryService>,
    pub profile_service: Arc<ProfileService>,
    pub job_posting_service: Arc<JobPostingService>,
}

impl AppState {
    pub fn new(db_client: Arc<dyn MarketplaceStore>, env: Config) -> Self {
        let query_timeout = env.query_timeout();

        AppState {
            job_board_service: Arc::new(JobBoardService::new(db_client.clone(), query_timeout)),
            worker_directory_service: Arc::new(WorkerDirectoryService::new(
                db_client.clone(),
                query_timeout,
            )),
            profile_service: Arc::new(ProfileService::new(db_client.clone(), query_timeout)),
            job_posting_service: Arc::new(JobPostingService::new(db_client.clone(), query_timeout)),
            db_client,
            env,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::DEBUG)
        .init();

    dotenv().ok();

    let config = Config::init();

    let pool = match PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
    {
        Ok(pool) => {
            tracing::info!("✅ Connection to the database is successful!");
            pool
        }
        Err(err) => {
            tracing::error!("🔥 Failed to connect to the database: {:?}", err);
            std::process::exit(1);
        }
    };

    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignoring invalid origin {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE])
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT]);

    let db_client: Arc<dyn MarketplaceStore> = Arc::new(DBClient::new(pool));
    let app_state = AppState::new(db_client, config.clone());

    let app = create_router(Arc::new(app_state)).layer(cors);

    tracing::info!("🚀 Server is running on http://localhost:{}", config.port);

    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("🔥 Failed to bind port {}: {:?}", config.port, err);
            std::process::exit(1);
        }
    };

    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!("server error: {:?}", err);
    }
}

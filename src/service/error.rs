use std::time::Duration;

use thiserror::Error;
use uuid::Uuid;

use crate::error::{ErrorMessage, HttpError};

pub const AUTH_PATH: &str = "/auth";
pub const PROFILE_PATH: &str = "/profile";

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Please log in to continue")]
    AuthenticationRequired,

    #[error("{0}")]
    Validation(String),

    #[error("You need to register as a worker to apply for jobs")]
    WorkerProfileRequired,

    #[error("Job {0} not found")]
    JobNotFound(Uuid),

    #[error("Job {0} is not open for applications")]
    JobNotOpen(Uuid),

    #[error("You cannot apply to your own job")]
    OwnJob(Uuid),

    #[error("The request timed out after {0:?}, please retry")]
    Timeout(Duration),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ServiceError {
    /// Failures the caller can simply try again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ServiceError::Timeout(_))
    }
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::AuthenticationRequired => {
                HttpError::unauthorized(ErrorMessage::AuthenticationRequired.to_string())
                    .with_redirect(AUTH_PATH)
            }
            ServiceError::WorkerProfileRequired => {
                HttpError::forbidden(ErrorMessage::WorkerProfileRequired.to_string())
                    .with_redirect(PROFILE_PATH)
            }
            ServiceError::Validation(_) => HttpError::bad_request(error.to_string()),
            ServiceError::JobNotFound(_) => HttpError::not_found(error.to_string()),
            ServiceError::JobNotOpen(_) | ServiceError::OwnJob(_) => {
                HttpError::conflict(error.to_string())
            }
            ServiceError::Timeout(_) => HttpError::service_unavailable(error.to_string()),
            ServiceError::Database(ref e) => {
                tracing::error!("store error: {}", e);
                HttpError::server_error(ErrorMessage::ServerError.to_string())
            }
        }
    }
}

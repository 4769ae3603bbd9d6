// service/job_posting_service.rs
use std::sync::Arc;
use std::time::Duration;

use crate::{
    db::{query_timeout::QueryTimeout, MarketplaceStore},
    middleware::Identity,
    models::{categorymodel::Category, jobmodel::Job},
    service::{
        error::ServiceError,
        forms::JobForm,
        outcome::{Navigation, Notice, Outcome},
    },
};

pub const JOBS_PATH: &str = "/jobs";

#[derive(Debug, Clone)]
pub struct JobPostingService {
    db_client: Arc<dyn MarketplaceStore>,
    query_timeout: Duration,
}

impl JobPostingService {
    pub fn new(db_client: Arc<dyn MarketplaceStore>, query_timeout: Duration) -> Self {
        Self {
            db_client,
            query_timeout,
        }
    }

    /// Categories for the selector. Posting is identity-gated, so is the form.
    pub async fn load_form(&self, identity: Identity) -> Result<Vec<Category>, ServiceError> {
        identity.require()?;
        QueryTimeout::execute_with_timeout(self.db_client.get_categories(), self.query_timeout).await
    }

    pub async fn submit(&self, identity: Identity, form: JobForm) -> Result<Outcome<Job>, ServiceError> {
        let client_id = identity.require()?;
        let new_job = form.into_new_job(client_id)?;

        let job = QueryTimeout::execute_with_timeout(
            self.db_client.create_job(new_job),
            self.query_timeout,
        )
        .await?;

        tracing::info!("job {} posted by {}", job.id, client_id);

        Ok(Outcome {
            data: job,
            notice: Notice::success("Job posted", "Your job has been successfully posted"),
            navigation: Some(Navigation::to(JOBS_PATH)),
        })
    }
}

// service/profile_service.rs
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::{
    db::{query_timeout::QueryTimeout, MarketplaceStore},
    middleware::Identity,
    models::{categorymodel::Category, profilemodel::Profile, workermodel::Worker},
    service::{
        error::ServiceError,
        forms::{ProfileForm, CATEGORY_REQUIRED_MESSAGE},
        outcome::Notice,
    },
};

/// What became of the worker half of a profile submission.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum WorkerWrite {
    /// Opt-in was off, worker fields were ignored.
    Skipped,
    Saved { worker: Worker },
    /// Refused before reaching the store.
    Rejected { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileSubmission {
    pub profile: Profile,
    pub worker: WorkerWrite,
    pub notice: Notice,
}

#[derive(Debug, Clone)]
pub struct ProfilePage {
    pub form: ProfileForm,
    pub registered_as_worker: bool,
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone)]
pub struct ProfileService {
    db_client: Arc<dyn MarketplaceStore>,
    query_timeout: Duration,
}

impl ProfileService {
    pub fn new(db_client: Arc<dyn MarketplaceStore>, query_timeout: Duration) -> Self {
        Self {
            db_client,
            query_timeout,
        }
    }

    /// Profile row and worker row are read independently and merged. Either
    /// may be absent.
    pub async fn load_form(&self, identity: Identity) -> Result<ProfilePage, ServiceError> {
        let user_id = identity.require()?;

        let (profile, worker, categories) = tokio::try_join!(
            QueryTimeout::execute_with_timeout(self.db_client.get_profile(user_id), self.query_timeout),
            QueryTimeout::execute_with_timeout(self.db_client.get_worker(user_id), self.query_timeout),
            QueryTimeout::execute_with_timeout(self.db_client.get_categories(), self.query_timeout),
        )?;

        Ok(ProfilePage {
            form: ProfileForm::from_rows(profile.as_ref(), worker.as_ref()),
            registered_as_worker: worker.is_some(),
            categories,
        })
    }

    pub async fn submit(
        &self,
        identity: Identity,
        form: ProfileForm,
    ) -> Result<ProfileSubmission, ServiceError> {
        let user_id = identity.require()?;

        // Parse worker fields up front so a bad number stops both writes.
        let worker_fields = if form.is_worker {
            Some(form.worker_fields()?)
        } else {
            None
        };

        let profile = QueryTimeout::execute_with_timeout(
            self.db_client.upsert_profile(form.basic_update(user_id)),
            self.query_timeout,
        )
        .await?;

        let worker = match (worker_fields, form.category_id) {
            (None, _) => WorkerWrite::Skipped,
            (Some(_), None) => {
                tracing::info!("worker write for {} rejected: no category", user_id);
                WorkerWrite::Rejected {
                    reason: CATEGORY_REQUIRED_MESSAGE.to_string(),
                }
            }
            (Some(fields), Some(category_id)) => {
                let upsert = form.worker_upsert(user_id, category_id, fields);
                let worker = QueryTimeout::execute_with_timeout(
                    self.db_client.upsert_worker(upsert),
                    self.query_timeout,
                )
                .await?;
                WorkerWrite::Saved { worker }
            }
        };

        let notice = match &worker {
            WorkerWrite::Rejected { reason } => Notice::destructive("Error", reason),
            _ => Notice::success("Profile updated", "Your profile has been successfully updated"),
        };

        Ok(ProfileSubmission {
            profile,
            worker,
            notice,
        })
    }
}

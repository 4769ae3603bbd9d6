// service/job_board_service.rs
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use uuid::Uuid;

use crate::{
    db::{query_timeout::QueryTimeout, MarketplaceStore},
    middleware::Identity,
    models::{
        categorymodel::Category,
        jobmodel::{JobScope, JobWithCategory},
        listingmodel::{JobView, PosterInfo},
    },
    service::{
        error::ServiceError,
        listing::{FetchFailure, JobFilters, JobListing, JobPartition},
        outcome::{Notice, Outcome},
    },
};

#[derive(Debug, Clone)]
pub struct JobBoardService {
    db_client: Arc<dyn MarketplaceStore>,
    query_timeout: Duration,
}

impl JobBoardService {
    pub fn new(db_client: Arc<dyn MarketplaceStore>, query_timeout: Duration) -> Self {
        Self {
            db_client,
            query_timeout,
        }
    }

    pub async fn categories(&self) -> Result<Vec<Category>, ServiceError> {
        QueryTimeout::execute_with_timeout(self.db_client.get_categories(), self.query_timeout).await
    }

    /// One partition's jobs, newest first, with category labels and posters
    /// resolved.
    pub async fn fetch_partition(&self, scope: JobScope) -> Result<Vec<JobView>, ServiceError> {
        let rows = QueryTimeout::execute_with_timeout(
            self.db_client.get_jobs(scope),
            self.query_timeout,
        )
        .await?;

        let posters = self.resolve_posters(&rows).await;

        Ok(rows
            .into_iter()
            .map(|row| {
                let poster = posters
                    .get(&row.job.client_id)
                    .cloned()
                    .unwrap_or_else(PosterInfo::anonymous);
                JobView::new(row, poster)
            })
            .collect())
    }

    // One batched lookup for every distinct poster. A failure here degrades
    // every poster to Anonymous instead of failing the list.
    async fn resolve_posters(&self, rows: &[JobWithCategory]) -> HashMap<Uuid, PosterInfo> {
        let mut client_ids: Vec<Uuid> = rows.iter().map(|row| row.job.client_id).collect();
        client_ids.sort();
        client_ids.dedup();

        if client_ids.is_empty() {
            return HashMap::new();
        }

        match QueryTimeout::execute_with_timeout(
            self.db_client.get_profiles_by_ids(&client_ids),
            self.query_timeout,
        )
        .await
        {
            Ok(profiles) => profiles
                .iter()
                .map(|profile| (profile.id, PosterInfo::from(profile)))
                .collect(),
            Err(e) => {
                tracing::warn!("poster lookup failed for {} profiles: {}", client_ids.len(), e);
                HashMap::new()
            }
        }
    }

    /// Fetches every partition the viewer may see concurrently, then selects
    /// `partition` and applies `filters` to it.
    pub async fn load_board(
        &self,
        identity: Identity,
        partition: JobPartition,
        filters: JobFilters,
    ) -> JobListing {
        let mut listing = JobListing::new(identity);

        let partitions = listing.enabled_partitions();
        let tickets: Vec<_> = partitions
            .iter()
            .map(|partition| listing.begin_fetch(*partition))
            .collect();

        let results = join_all(tickets.iter().map(|ticket| async move {
            match ticket.key.scope(identity.user_id()) {
                Some(scope) => self.fetch_partition(scope).await,
                None => Err(ServiceError::AuthenticationRequired),
            }
        }))
        .await;

        for (ticket, result) in tickets.into_iter().zip(results) {
            let result = result.map_err(|e| {
                tracing::error!("failed to load {} jobs: {}", ticket.key.to_str(), e);
                FetchFailure::from(&e)
            });
            listing.complete_fetch(ticket, result);
        }

        listing.select_partition(partition);
        listing.set_search(filters.search);
        listing.set_category_filter(filters.category);
        listing.set_status_filter(filters.status);

        listing
    }

    /// Registers interest in an open job. Nothing is written; the job keeps
    /// its status and assignment.
    pub async fn apply_for_job(
        &self,
        identity: Identity,
        job_id: Uuid,
    ) -> Result<Outcome<Uuid>, ServiceError> {
        let user_id = identity.require()?;

        let job = QueryTimeout::execute_with_timeout(
            self.db_client.get_job_by_id(job_id),
            self.query_timeout,
        )
        .await?
        .ok_or(ServiceError::JobNotFound(job_id))?;

        if !job.status.is_open() {
            return Err(ServiceError::JobNotOpen(job_id));
        }

        if job.client_id == user_id {
            return Err(ServiceError::OwnJob(job_id));
        }

        let worker = QueryTimeout::execute_with_timeout(
            self.db_client.get_worker(user_id),
            self.query_timeout,
        )
        .await?;

        if worker.is_none() {
            return Err(ServiceError::WorkerProfileRequired);
        }

        tracing::info!("worker {} registered interest in job {}", user_id, job.id);

        Ok(Outcome {
            data: job.id,
            notice: Notice::success(
                "Application sent",
                "Your interest has been registered for this job",
            ),
            navigation: None,
        })
    }
}

// service/worker_directory_service.rs
use std::sync::Arc;
use std::time::Duration;

use crate::{
    db::{query_timeout::QueryTimeout, MarketplaceStore},
    models::{categorymodel::Category, listingmodel::WorkerView},
    service::{
        error::ServiceError,
        listing::{FetchFailure, WorkerListing},
    },
};

#[derive(Debug, Clone)]
pub struct WorkerDirectoryService {
    db_client: Arc<dyn MarketplaceStore>,
    query_timeout: Duration,
}

impl WorkerDirectoryService {
    pub fn new(db_client: Arc<dyn MarketplaceStore>, query_timeout: Duration) -> Self {
        Self {
            db_client,
            query_timeout,
        }
    }

    /// Available workers in scope. Workers without a profile row are kept.
    pub async fn fetch_workers(&self, category_id: Option<i32>) -> Result<Vec<WorkerView>, ServiceError> {
        let rows = QueryTimeout::execute_with_timeout(
            self.db_client.get_available_workers(category_id),
            self.query_timeout,
        )
        .await?;

        Ok(rows.into_iter().map(WorkerView::from).collect())
    }

    pub async fn load_directory(&self, scope: Option<i32>, search: &str) -> WorkerListing {
        let mut listing = WorkerListing::new(scope);
        let ticket = listing.begin_fetch();

        let result = self.fetch_workers(scope).await.map_err(|e| {
            tracing::error!("failed to load workers for {:?}: {}", scope, e);
            FetchFailure::from(&e)
        });
        listing.complete_fetch(ticket, result);
        listing.set_search(search);

        listing
    }

    /// The scoped category, for the page heading. Unknown ids resolve to `None`.
    pub async fn scope_category(&self, scope: Option<i32>) -> Result<Option<Category>, ServiceError> {
        let Some(category_id) = scope else {
            return Ok(None);
        };

        let categories = QueryTimeout::execute_with_timeout(
            self.db_client.get_categories(),
            self.query_timeout,
        )
        .await?;

        Ok(categories.into_iter().find(|c| c.id == category_id))
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::commondtos::{optional_filter, parse_category_param, CategoryDto, ListingDto};
use crate::error::HttpError;
use crate::models::categorymodel::CategoryLabel;
use crate::models::jobmodel::{Job, JobStatus};
use crate::models::listingmodel::JobView;
use crate::service::listing::{FetchState, JobFilters, JobListing, JobPartition};
use crate::utils::decimal::BigDecimalHelpers;

#[derive(Debug, Default, Deserialize)]
pub struct JobBoardQueryDto {
    pub tab: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
}

impl JobBoardQueryDto {
    pub fn parse(&self) -> Result<(JobPartition, JobFilters), HttpError> {
        let partition = match self.tab.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            Some(tab) => tab.parse::<JobPartition>().map_err(HttpError::bad_request)?,
            None => JobPartition::default(),
        };

        let status = optional_filter(self.status.as_deref())
            .map(|raw| raw.parse::<JobStatus>().map_err(HttpError::bad_request))
            .transpose()?;

        let filters = JobFilters {
            search: self.search.clone().unwrap_or_default(),
            category: parse_category_param(self.category.as_deref())?,
            status,
        };

        Ok((partition, filters))
    }
}

#[derive(Debug, Serialize)]
pub struct PosterDto {
    pub name: String,
    pub handle: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardAction {
    Apply,
    Manage,
}

#[derive(Debug, Serialize)]
pub struct ApplyActionDto {
    pub action: CardAction,
    pub enabled: bool,
    pub label: String,
}

impl ApplyActionDto {
    /// The poster manages their own job. Everyone else may apply while it is open.
    pub fn for_job(job: &Job, viewer: Option<Uuid>) -> Self {
        if viewer == Some(job.client_id) {
            return ApplyActionDto {
                action: CardAction::Manage,
                enabled: true,
                label: "Manage Job".to_string(),
            };
        }

        let enabled = job.status.is_open();
        ApplyActionDto {
            action: CardAction::Apply,
            enabled,
            label: if enabled { "Apply for Job" } else { "Not Available" }.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JobCardDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: CategoryLabel,
    pub status: JobStatus,
    pub status_label: String,
    pub budget: Option<f64>,
    pub location: Option<String>,
    pub posted_on: String,
    pub client: PosterDto,
    pub apply: ApplyActionDto,
}

pub fn posted_on(created_at: &DateTime<Utc>) -> String {
    created_at.format("%-d %b %Y").to_string()
}

impl JobCardDto {
    pub fn new(view: &JobView, viewer: Option<Uuid>) -> Self {
        let job = &view.job;
        JobCardDto {
            id: job.id,
            title: job.title.clone(),
            description: job.description.clone(),
            category: view.category.clone(),
            status: job.status,
            status_label: job.status.label().to_string(),
            budget: job.budget.to_f64_lossy(),
            location: job.location.clone(),
            posted_on: posted_on(&job.created_at),
            client: PosterDto {
                name: view.poster.display_name.clone(),
                handle: view.poster.handle.clone(),
            },
            apply: ApplyActionDto::for_job(job, viewer),
        }
    }
}

/// A freshly written job, before any join.
#[derive(Debug, Serialize)]
pub struct JobDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category_id: i32,
    pub client_id: Uuid,
    pub worker_id: Option<Uuid>,
    pub status: JobStatus,
    pub budget: Option<f64>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Job> for JobDto {
    fn from(job: &Job) -> Self {
        JobDto {
            id: job.id,
            title: job.title.clone(),
            description: job.description.clone(),
            category_id: job.category_id,
            client_id: job.client_id,
            worker_id: job.worker_id,
            status: job.status,
            budget: job.budget.to_f64_lossy(),
            location: job.location.clone(),
            created_at: job.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TabDto {
    pub partition: JobPartition,
    pub label: String,
    pub enabled: bool,
    pub state: String,
}

#[derive(Debug, Serialize)]
pub struct FiltersDto {
    pub search: String,
    pub category: Option<i32>,
    pub status: Option<JobStatus>,
}

#[derive(Debug, Serialize)]
pub struct JobBoardDto {
    pub active: JobPartition,
    pub tabs: Vec<TabDto>,
    pub filters: FiltersDto,
    pub categories: Vec<CategoryDto>,
    pub listing: ListingDto<JobCardDto>,
}

pub fn empty_message(partition: JobPartition) -> &'static str {
    match partition {
        JobPartition::All => "No jobs found. Try a different search or filter.",
        JobPartition::Mine => "You haven't posted any jobs yet",
        JobPartition::AssignedToMe => "No jobs are currently assigned to you",
    }
}

pub fn login_message(partition: JobPartition) -> &'static str {
    match partition {
        JobPartition::AssignedToMe => "Please log in to view jobs assigned to you",
        _ => "Please log in to view your jobs",
    }
}

fn tab_state(listing: &JobListing, partition: JobPartition) -> &'static str {
    if !listing.is_enabled(partition) {
        return "login_required";
    }
    match listing.fetch_state(partition) {
        None => "idle",
        Some(FetchState::Loading) => "loading",
        Some(FetchState::Ready(_)) => "ready",
        Some(FetchState::Failed(_)) => "failed",
    }
}

impl JobBoardDto {
    pub fn new(listing: &JobListing, categories: Vec<CategoryDto>) -> Self {
        let active = listing.active();
        let tabs = JobPartition::EVERY
            .into_iter()
            .map(|partition| TabDto {
                partition,
                label: partition.label().to_string(),
                enabled: listing.is_enabled(partition),
                state: tab_state(listing, partition).to_string(),
            })
            .collect();

        let filters = listing.filters();
        let viewer = listing.viewer();

        JobBoardDto {
            active,
            tabs,
            filters: FiltersDto {
                search: filters.search.clone(),
                category: filters.category,
                status: filters.status,
            },
            categories,
            listing: ListingDto::from_view(
                listing.visible(),
                |view| JobCardDto::new(view, viewer),
                empty_message(active),
                login_message(active),
            ),
        }
    }
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::commondtos::{parse_category_param, ListingDto};
use crate::error::HttpError;
use crate::models::listingmodel::WorkerView;
use crate::service::listing::WorkerListing;
use crate::utils::decimal::BigDecimalHelpers;

pub const NO_WORKERS_MESSAGE: &str = "No workers found. Try a different search or category.";

/// `name` only labels the page; scoping is done by `category`.
#[derive(Debug, Default, Deserialize)]
pub struct WorkerDirectoryQueryDto {
    pub category: Option<String>,
    pub name: Option<String>,
    pub search: Option<String>,
}

impl WorkerDirectoryQueryDto {
    pub fn scope(&self) -> Result<Option<i32>, HttpError> {
        parse_category_param(self.category.as_deref())
    }

    pub fn label(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|name| !name.is_empty())
    }
}

pub fn heading(category_name: Option<&str>) -> String {
    match category_name {
        Some(name) => format!("{} Workers", name),
        None => "All Workers".to_string(),
    }
}

#[derive(Debug, Serialize)]
pub struct WorkerCardDto {
    pub id: Uuid,
    pub name: String,
    pub handle: Option<String>,
    pub avatar_url: Option<String>,
    pub category_id: Option<i32>,
    pub hourly_rate: Option<f64>,
    pub years_experience: Option<i32>,
    pub skills: Vec<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
}

impl From<&WorkerView> for WorkerCardDto {
    fn from(view: &WorkerView) -> Self {
        let worker = &view.worker;
        WorkerCardDto {
            id: worker.id,
            name: view.display_name(),
            handle: view.handle().map(String::from),
            avatar_url: view.avatar_url().map(String::from),
            category_id: worker.category_id,
            hourly_rate: worker.hourly_rate.to_f64_lossy(),
            years_experience: worker.years_experience,
            skills: worker.skills.clone(),
            bio: worker.bio.clone(),
            location: worker.location.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WorkerDirectoryDto {
    pub heading: String,
    pub category: Option<i32>,
    pub search: String,
    pub listing: ListingDto<WorkerCardDto>,
}

impl WorkerDirectoryDto {
    pub fn new(listing: &WorkerListing, category_name: Option<&str>) -> Self {
        WorkerDirectoryDto {
            heading: heading(category_name),
            category: listing.scope(),
            search: listing.search().to_string(),
            listing: ListingDto::from_view(
                listing.visible(),
                |view| WorkerCardDto::from(view),
                NO_WORKERS_MESSAGE,
                "",
            ),
        }
    }
}

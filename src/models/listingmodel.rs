use serde::Serialize;

use super::categorymodel::CategoryLabel;
use super::jobmodel::{Job, JobWithCategory};
use super::profilemodel::ProfileSummary;
use super::workermodel::{Worker, WorkerWithProfile};

pub const ANONYMOUS_NAME: &str = "Anonymous";

/// Display identity of whoever posted a job.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PosterInfo {
    pub display_name: String,
    pub handle: Option<String>,
}

impl PosterInfo {
    pub fn anonymous() -> Self {
        PosterInfo {
            display_name: ANONYMOUS_NAME.to_string(),
            handle: None,
        }
    }
}

impl From<&ProfileSummary> for PosterInfo {
    fn from(profile: &ProfileSummary) -> Self {
        PosterInfo {
            display_name: display_name(profile.full_name.as_deref()),
            handle: profile.username.clone(),
        }
    }
}

/// A job with its category label and poster resolved.
#[derive(Debug, Clone, Serialize)]
pub struct JobView {
    pub job: Job,
    pub category: CategoryLabel,
    pub poster: PosterInfo,
}

impl JobView {
    pub fn new(row: JobWithCategory, poster: PosterInfo) -> Self {
        let category = CategoryLabel::resolve(
            Some(row.job.category_id),
            row.category_name,
            row.category_icon,
        );
        JobView {
            job: row.job,
            category,
            poster,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkerView {
    pub worker: Worker,
    pub profile: Option<ProfileSummary>,
}

impl WorkerView {
    pub fn display_name(&self) -> String {
        display_name(self.profile.as_ref().and_then(|p| p.full_name.as_deref()))
    }

    pub fn handle(&self) -> Option<&str> {
        self.profile.as_ref().and_then(|p| p.username.as_deref())
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.profile.as_ref().and_then(|p| p.avatar_url.as_deref())
    }
}

impl From<WorkerWithProfile> for WorkerView {
    fn from(row: WorkerWithProfile) -> Self {
        let profile = row.profile();
        WorkerView {
            worker: row.worker,
            profile,
        }
    }
}

fn display_name(full_name: Option<&str>) -> String {
    match full_name.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => ANONYMOUS_NAME.to_string(),
    }
}

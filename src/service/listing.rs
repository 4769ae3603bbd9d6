// Partitioned job and worker listings with in-process filtering
use std::collections::HashMap;
use std::hash::Hash;
use std::str::FromStr;

use serde::Serialize;
use uuid::Uuid;

use super::error::ServiceError;
use crate::middleware::Identity;
use crate::models::jobmodel::{JobScope, JobStatus};
use crate::models::listingmodel::{JobView, WorkerView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum JobPartition {
    #[default]
    All,
    Mine,
    AssignedToMe,
}

impl JobPartition {
    pub const EVERY: [JobPartition; 3] = [
        JobPartition::All,
        JobPartition::Mine,
        JobPartition::AssignedToMe,
    ];

    pub fn to_str(&self) -> &str {
        match self {
            JobPartition::All => "all",
            JobPartition::Mine => "mine",
            JobPartition::AssignedToMe => "assigned-to-me",
        }
    }

    pub fn label(&self) -> &str {
        match self {
            JobPartition::All => "All Jobs",
            JobPartition::Mine => "My Jobs",
            JobPartition::AssignedToMe => "Assigned to Me",
        }
    }

    pub fn requires_identity(&self) -> bool {
        !matches!(self, JobPartition::All)
    }

    /// The store query backing this partition, or `None` when the viewer
    /// cannot see it.
    pub fn scope(&self, user_id: Option<Uuid>) -> Option<JobScope> {
        match (self, user_id) {
            (JobPartition::All, _) => Some(JobScope::All),
            (JobPartition::Mine, Some(id)) => Some(JobScope::PostedBy(id)),
            (JobPartition::AssignedToMe, Some(id)) => Some(JobScope::AssignedTo(id)),
            _ => None,
        }
    }
}

impl FromStr for JobPartition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" | "all-jobs" => Ok(JobPartition::All),
            "mine" | "my-jobs" => Ok(JobPartition::Mine),
            "assigned-to-me" | "assigned-jobs" => Ok(JobPartition::AssignedToMe),
            other => Err(format!("Unknown job tab: {}", other)),
        }
    }
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Job predicates, combined with AND. `None` means unspecified. The search
/// term is matched as typed, only an empty term matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilters {
    pub search: String,
    pub category: Option<i32>,
    pub status: Option<JobStatus>,
}

impl JobFilters {
    pub fn matches(&self, view: &JobView) -> bool {
        let job = &view.job;
        let term = self.search.to_lowercase();

        let text_ok = term.is_empty()
            || contains_ci(&job.title, &term)
            || contains_ci(&job.description, &term)
            || job
                .location
                .as_deref()
                .map_or(false, |location| contains_ci(location, &term));

        let category_ok = self.category.map_or(true, |id| job.category_id == id);
        let status_ok = self.status.map_or(true, |status| job.status == status);

        text_ok && category_ok && status_ok
    }
}

pub fn filter_jobs<'a>(jobs: &'a [JobView], filters: &JobFilters) -> Vec<&'a JobView> {
    jobs.iter().filter(|view| filters.matches(view)).collect()
}

/// Name, location, bio or any skill contains the term. The placeholder name
/// shown for profile-less workers is not searchable.
pub fn worker_matches(view: &WorkerView, search: &str) -> bool {
    let term = search.to_lowercase();
    if term.is_empty() {
        return true;
    }

    let worker = &view.worker;
    let name = view.profile.as_ref().and_then(|p| p.full_name.as_deref());

    name.map_or(false, |n| contains_ci(n, &term))
        || worker.location.as_deref().map_or(false, |l| contains_ci(l, &term))
        || worker.bio.as_deref().map_or(false, |b| contains_ci(b, &term))
        || worker.skills.iter().any(|skill| contains_ci(skill, &term))
}

pub fn filter_workers<'a>(workers: &'a [WorkerView], search: &str) -> Vec<&'a WorkerView> {
    workers.iter().filter(|view| worker_matches(view, search)).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchFailure {
    pub message: String,
    pub retryable: bool,
}

impl From<&ServiceError> for FetchFailure {
    fn from(error: &ServiceError) -> Self {
        let message = match error {
            ServiceError::Database(_) => "Failed to load data. Please try again.".to_string(),
            other => other.to_string(),
        };
        FetchFailure {
            message,
            retryable: error.is_retryable(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum FetchState<T> {
    Loading,
    Ready(T),
    Failed(FetchFailure),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket<K> {
    pub key: K,
    pub request_id: u64,
}

#[derive(Debug)]
struct Slot<T> {
    latest: u64,
    state: FetchState<T>,
}

/// Per-key fetch state. Only the result of the most recently begun request
/// for a key is kept; anything older is dropped on arrival.
#[derive(Debug)]
pub struct RequestTracker<K, T> {
    next_id: u64,
    slots: HashMap<K, Slot<T>>,
}

impl<K, T> Default for RequestTracker<K, T> {
    fn default() -> Self {
        RequestTracker {
            next_id: 0,
            slots: HashMap::new(),
        }
    }
}

impl<K, T> RequestTracker<K, T>
where
    K: Copy + Eq + Hash + std::fmt::Debug,
{
    pub fn begin(&mut self, key: K) -> FetchTicket<K> {
        self.next_id += 1;
        let request_id = self.next_id;
        self.slots.insert(
            key,
            Slot {
                latest: request_id,
                state: FetchState::Loading,
            },
        );
        FetchTicket { key, request_id }
    }

    /// Returns false when the ticket was superseded and the result discarded.
    pub fn complete(&mut self, ticket: FetchTicket<K>, result: Result<T, FetchFailure>) -> bool {
        match self.slots.get_mut(&ticket.key) {
            Some(slot) if slot.latest == ticket.request_id => {
                slot.state = match result {
                    Ok(data) => FetchState::Ready(data),
                    Err(failure) => FetchState::Failed(failure),
                };
                true
            }
            _ => {
                tracing::warn!(
                    "discarding stale result for {:?} (request {})",
                    ticket.key,
                    ticket.request_id
                );
                false
            }
        }
    }

    pub fn state(&self, key: &K) -> Option<&FetchState<T>> {
        self.slots.get(key).map(|slot| &slot.state)
    }
}

/// What a listing shows right now.
#[derive(Debug)]
pub enum ListingView<'a, T> {
    LoginRequired,
    Loading,
    Failed(&'a FetchFailure),
    Ready(Vec<&'a T>),
}

#[derive(Debug)]
pub struct JobListing {
    identity: Identity,
    active: JobPartition,
    filters: JobFilters,
    fetches: RequestTracker<JobPartition, Vec<JobView>>,
}

impl JobListing {
    pub fn new(identity: Identity) -> Self {
        JobListing {
            identity,
            active: JobPartition::All,
            filters: JobFilters::default(),
            fetches: RequestTracker::default(),
        }
    }

    pub fn active(&self) -> JobPartition {
        self.active
    }

    /// The signed-in viewer, if any.
    pub fn viewer(&self) -> Option<Uuid> {
        self.identity.user_id()
    }

    pub fn filters(&self) -> &JobFilters {
        &self.filters
    }

    pub fn is_enabled(&self, partition: JobPartition) -> bool {
        !partition.requires_identity() || self.identity.is_authenticated()
    }

    pub fn enabled_partitions(&self) -> Vec<JobPartition> {
        JobPartition::EVERY
            .into_iter()
            .filter(|p| self.is_enabled(*p))
            .collect()
    }

    /// Switching partition always clears every filter input.
    pub fn select_partition(&mut self, partition: JobPartition) {
        self.active = partition;
        self.filters = JobFilters::default();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filters.search = search.into();
    }

    pub fn set_category_filter(&mut self, category: Option<i32>) {
        self.filters.category = category;
    }

    pub fn set_status_filter(&mut self, status: Option<JobStatus>) {
        self.filters.status = status;
    }

    pub fn begin_fetch(&mut self, partition: JobPartition) -> FetchTicket<JobPartition> {
        self.fetches.begin(partition)
    }

    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket<JobPartition>,
        result: Result<Vec<JobView>, FetchFailure>,
    ) -> bool {
        self.fetches.complete(ticket, result)
    }

    pub fn fetch_state(&self, partition: JobPartition) -> Option<&FetchState<Vec<JobView>>> {
        self.fetches.state(&partition)
    }

    pub fn visible(&self) -> ListingView<'_, JobView> {
        if !self.is_enabled(self.active) {
            return ListingView::LoginRequired;
        }

        match self.fetches.state(&self.active) {
            None | Some(FetchState::Loading) => ListingView::Loading,
            Some(FetchState::Failed(failure)) => ListingView::Failed(failure),
            Some(FetchState::Ready(rows)) => {
                let own_id = self.identity.user_id();
                let items = rows
                    .iter()
                    .filter(|view| {
                        self.active != JobPartition::All
                            || own_id.map_or(true, |id| view.job.client_id != id)
                    })
                    .filter(|view| self.filters.matches(view))
                    .collect();
                ListingView::Ready(items)
            }
        }
    }
}

/// Available workers, optionally scoped to one category.
#[derive(Debug, Default)]
pub struct WorkerListing {
    scope: Option<i32>,
    search: String,
    fetches: RequestTracker<Option<i32>, Vec<WorkerView>>,
}

impl WorkerListing {
    pub fn new(scope: Option<i32>) -> Self {
        WorkerListing {
            scope,
            ..Default::default()
        }
    }

    pub fn scope(&self) -> Option<i32> {
        self.scope
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_scope(&mut self, scope: Option<i32>) {
        self.scope = scope;
        self.search.clear();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn begin_fetch(&mut self) -> FetchTicket<Option<i32>> {
        self.fetches.begin(self.scope)
    }

    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket<Option<i32>>,
        result: Result<Vec<WorkerView>, FetchFailure>,
    ) -> bool {
        self.fetches.complete(ticket, result)
    }

    pub fn visible(&self) -> ListingView<'_, WorkerView> {
        match self.fetches.state(&self.scope) {
            None | Some(FetchState::Loading) => ListingView::Loading,
            Some(FetchState::Failed(failure)) => ListingView::Failed(failure),
            Some(FetchState::Ready(rows)) => ListingView::Ready(filter_workers(rows, &self.search)),
        }
    }
}

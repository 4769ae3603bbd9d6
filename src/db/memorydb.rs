// db/memorydb.rs
//
// In-memory stand-in for the hosted store, used by service and handler tests.
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::BigDecimal, Error};
use uuid::Uuid;

use super::{categorydb::CategoryExt, jobdb::JobExt, profiledb::ProfileExt, workerdb::WorkerExt};
use crate::models::{
    categorymodel::Category,
    jobmodel::{Job, JobScope, JobStatus, JobWithCategory, NewJob},
    profilemodel::{Profile, ProfileSummary, ProfileUpdate},
    workermodel::{Worker, WorkerUpsert, WorkerWithProfile},
};

#[derive(Debug, Default)]
struct MemoryState {
    categories: Vec<Category>,
    profiles: Vec<Profile>,
    workers: Vec<Worker>,
    jobs: Vec<Job>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
    pub worker_lookups: AtomicUsize,
    pub profile_batch_lookups: AtomicUsize,
    pub worker_writes: AtomicUsize,
    pub profile_writes: AtomicUsize,
    pub job_writes: AtomicUsize,
    fail_profile_batch: Mutex<bool>,
    fail_scope: Mutex<Option<JobScope>>,
    jobs_delay: Mutex<Option<Duration>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The four trade categories the hosted store is seeded with.
    pub fn seeded() -> Self {
        let store = Self::new();
        {
            let mut state = store.state.lock().unwrap();
            state.categories = vec![
                Category { id: 1, name: "Laborers".into(), icon: Some("hammer".into()) },
                Category { id: 2, name: "Electricians".into(), icon: Some("plug".into()) },
                Category { id: 3, name: "Plumbers".into(), icon: Some("wrench".into()) },
                Category { id: 4, name: "Other Skills".into(), icon: None },
            ];
        }
        store
    }

    pub fn add_profile(&self, id: Uuid, full_name: &str, username: &str) {
        self.state.lock().unwrap().profiles.push(Profile {
            id,
            full_name: Some(full_name.to_string()),
            username: Some(username.to_string()),
            avatar_url: None,
            is_worker: false,
            updated_at: None,
        });
    }

    pub fn add_worker(&self, worker: Worker) {
        self.state.lock().unwrap().workers.push(worker);
    }

    pub fn add_job(&self, job: Job) {
        self.state.lock().unwrap().jobs.push(job);
    }

    pub fn jobs(&self) -> Vec<Job> {
        self.state.lock().unwrap().jobs.clone()
    }

    pub fn workers(&self) -> Vec<Worker> {
        self.state.lock().unwrap().workers.clone()
    }

    pub fn profiles(&self) -> Vec<Profile> {
        self.state.lock().unwrap().profiles.clone()
    }

    pub fn fail_profile_batch(&self) {
        *self.fail_profile_batch.lock().unwrap() = true;
    }

    pub fn fail_jobs_for(&self, scope: JobScope) {
        *self.fail_scope.lock().unwrap() = Some(scope);
    }

    pub fn delay_jobs(&self, delay: Duration) {
        *self.jobs_delay.lock().unwrap() = Some(delay);
    }
}

pub fn worker_fixture(id: Uuid, category_id: i32, skills: &[&str]) -> Worker {
    Worker {
        id,
        category_id: Some(category_id),
        hourly_rate: Some(BigDecimal::from(25)),
        years_experience: Some(4),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        bio: Some("Reliable and tidy".to_string()),
        location: Some("Pune".to_string()),
        available: true,
        created_at: Some(Utc::now()),
        updated_at: Some(Utc::now()),
    }
}

pub fn job_fixture(
    client_id: Uuid,
    title: &str,
    category_id: i32,
    status: JobStatus,
    created_at: DateTime<Utc>,
) -> Job {
    Job {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: format!("{} needed", title),
        category_id,
        client_id,
        worker_id: None,
        status,
        budget: None,
        location: None,
        created_at,
        updated_at: created_at,
    }
}

#[async_trait]
impl CategoryExt for MemoryStore {
    async fn get_categories(&self) -> Result<Vec<Category>, Error> {
        Ok(self.state.lock().unwrap().categories.clone())
    }
}

#[async_trait]
impl ProfileExt for MemoryStore {
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>, Error> {
        let state = self.state.lock().unwrap();
        Ok(state.profiles.iter().find(|p| p.id == user_id).cloned())
    }

    async fn get_profiles_by_ids(&self, ids: &[Uuid]) -> Result<Vec<ProfileSummary>, Error> {
        self.profile_batch_lookups.fetch_add(1, Ordering::SeqCst);
        if *self.fail_profile_batch.lock().unwrap() {
            return Err(Error::PoolTimedOut);
        }
        let state = self.state.lock().unwrap();
        Ok(state
            .profiles
            .iter()
            .filter(|p| ids.contains(&p.id))
            .map(ProfileSummary::from)
            .collect())
    }

    async fn upsert_profile(&self, update: ProfileUpdate) -> Result<Profile, Error> {
        self.profile_writes.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        let profile = Profile {
            id: update.id,
            full_name: update.full_name,
            username: update.username,
            avatar_url: update.avatar_url,
            is_worker: update.is_worker,
            updated_at: Some(Utc::now()),
        };
        state.profiles.retain(|p| p.id != profile.id);
        state.profiles.push(profile.clone());
        Ok(profile)
    }
}

#[async_trait]
impl WorkerExt for MemoryStore {
    async fn get_worker(&self, user_id: Uuid) -> Result<Option<Worker>, Error> {
        self.worker_lookups.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().unwrap();
        Ok(state.workers.iter().find(|w| w.id == user_id).cloned())
    }

    async fn get_available_workers(
        &self,
        category_id: Option<i32>,
    ) -> Result<Vec<WorkerWithProfile>, Error> {
        let state = self.state.lock().unwrap();
        Ok(state
            .workers
            .iter()
            .filter(|w| w.available)
            .filter(|w| category_id.map_or(true, |c| w.category_id == Some(c)))
            .map(|w| {
                let profile = state.profiles.iter().find(|p| p.id == w.id);
                WorkerWithProfile {
                    worker: w.clone(),
                    profile_id: profile.map(|p| p.id),
                    full_name: profile.and_then(|p| p.full_name.clone()),
                    username: profile.and_then(|p| p.username.clone()),
                    avatar_url: profile.and_then(|p| p.avatar_url.clone()),
                }
            })
            .collect())
    }

    async fn upsert_worker(&self, upsert: WorkerUpsert) -> Result<Worker, Error> {
        self.worker_writes.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        let created_at = state
            .workers
            .iter()
            .find(|w| w.id == upsert.id)
            .and_then(|w| w.created_at)
            .unwrap_or_else(Utc::now);
        let worker = Worker {
            id: upsert.id,
            category_id: Some(upsert.category_id),
            hourly_rate: upsert.hourly_rate,
            years_experience: upsert.years_experience,
            skills: upsert.skills,
            bio: upsert.bio,
            location: upsert.location,
            available: upsert.available,
            created_at: Some(created_at),
            updated_at: Some(Utc::now()),
        };
        state.workers.retain(|w| w.id != worker.id);
        state.workers.push(worker.clone());
        Ok(worker)
    }
}

#[async_trait]
impl JobExt for MemoryStore {
    async fn get_jobs(&self, scope: JobScope) -> Result<Vec<JobWithCategory>, Error> {
        let delay = *self.jobs_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if *self.fail_scope.lock().unwrap() == Some(scope) {
            return Err(Error::PoolTimedOut);
        }

        let state = self.state.lock().unwrap();
        let mut jobs: Vec<JobWithCategory> = state
            .jobs
            .iter()
            .filter(|j| match scope {
                JobScope::All => true,
                JobScope::PostedBy(id) => j.client_id == id,
                JobScope::AssignedTo(id) => j.worker_id == Some(id),
            })
            .map(|j| {
                let category = state.categories.iter().find(|c| c.id == j.category_id);
                JobWithCategory {
                    job: j.clone(),
                    category_name: category.map(|c| c.name.clone()),
                    category_icon: category.and_then(|c| c.icon.clone()),
                }
            })
            .collect();
        jobs.sort_by(|a, b| b.job.created_at.cmp(&a.job.created_at));
        Ok(jobs)
    }

    async fn get_job_by_id(&self, job_id: Uuid) -> Result<Option<Job>, Error> {
        let state = self.state.lock().unwrap();
        Ok(state.jobs.iter().find(|j| j.id == job_id).cloned())
    }

    async fn create_job(&self, new_job: NewJob) -> Result<Job, Error> {
        self.job_writes.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let job = Job {
            id: Uuid::new_v4(),
            title: new_job.title,
            description: new_job.description,
            category_id: new_job.category_id,
            client_id: new_job.client_id,
            worker_id: None,
            status: JobStatus::Open,
            budget: new_job.budget,
            location: new_job.location,
            created_at: now,
            updated_at: now,
        };
        self.state.lock().unwrap().jobs.push(job.clone());
        Ok(job)
    }
}

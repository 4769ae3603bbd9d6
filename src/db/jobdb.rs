// db/jobdb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::jobmodel::{Job, JobScope, JobWithCategory, NewJob};

#[async_trait]
pub trait JobExt {
    /// Jobs for one scope, category left-joined, newest first.
    async fn get_jobs(&self, scope: JobScope) -> Result<Vec<JobWithCategory>, Error>;

    async fn get_job_by_id(&self, job_id: Uuid) -> Result<Option<Job>, Error>;

    /// Inserts with status `open` and no assigned worker.
    async fn create_job(&self, job: NewJob) -> Result<Job, Error>;
}

#[async_trait]
impl JobExt for DBClient {
    async fn get_jobs(&self, scope: JobScope) -> Result<Vec<JobWithCategory>, Error> {
        let (client_id, worker_id) = match scope {
            JobScope::All => (None, None),
            JobScope::PostedBy(user_id) => (Some(user_id), None),
            JobScope::AssignedTo(user_id) => (None, Some(user_id)),
        };

        sqlx::query_as::<_, JobWithCategory>(
            r#"
            SELECT
                j.id, j.title, j.description,
                j.category_id, j.client_id, j.worker_id,
                j.status::TEXT AS status,
                j.budget, j.location,
                j.created_at, j.updated_at,
                c.name AS category_name,
                c.icon AS category_icon
            FROM jobs j
            LEFT JOIN categories c ON c.id = j.category_id
            WHERE ($1::UUID IS NULL OR j.client_id = $1)
              AND ($2::UUID IS NULL OR j.worker_id = $2)
            ORDER BY j.created_at DESC
            "#
        )
        .bind(client_id)
        .bind(worker_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_job_by_id(&self, job_id: Uuid) -> Result<Option<Job>, Error> {
        sqlx::query_as::<_, Job>(
            r#"
            SELECT
                id, title, description,
                category_id, client_id, worker_id,
                status::TEXT AS status,
                budget, location,
                created_at, updated_at
            FROM jobs
            WHERE id = $1
            "#
        )
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn create_job(&self, job: NewJob) -> Result<Job, Error> {
        sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs
            (title, description, category_id, client_id, budget, location, status)
            VALUES ($1, $2, $3, $4, $5, $6, 'open')
            RETURNING
                id, title, description,
                category_id, client_id, worker_id,
                status::TEXT AS status,
                budget, location,
                created_at, updated_at
            "#
        )
        .bind(job.title)
        .bind(job.description)
        .bind(job.category_id)
        .bind(job.client_id)
        .bind(job.budget)
        .bind(job.location)
        .fetch_one(&self.pool)
        .await
    }
}

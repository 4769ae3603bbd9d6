// db/workerdb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::workermodel::{Worker, WorkerUpsert, WorkerWithProfile};

#[async_trait]
pub trait WorkerExt {
    /// `Ok(None)` when the account has not opted in as a worker.
    async fn get_worker(&self, user_id: Uuid) -> Result<Option<Worker>, Error>;

    /// Available workers only, optionally scoped to one category, with
    /// profile fields left-joined in.
    async fn get_available_workers(
        &self,
        category_id: Option<i32>,
    ) -> Result<Vec<WorkerWithProfile>, Error>;

    /// Single idempotent write keyed by the account id.
    async fn upsert_worker(&self, worker: WorkerUpsert) -> Result<Worker, Error>;
}

#[async_trait]
impl WorkerExt for DBClient {
    async fn get_worker(&self, user_id: Uuid) -> Result<Option<Worker>, Error> {
        sqlx::query_as::<_, Worker>(
            r#"
            SELECT
                id, category_id, hourly_rate, years_experience,
                COALESCE(skills, '{}') AS skills,
                bio, location,
                COALESCE(available, TRUE) AS available,
                created_at, updated_at
            FROM workers
            WHERE id = $1
            "#
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_available_workers(
        &self,
        category_id: Option<i32>,
    ) -> Result<Vec<WorkerWithProfile>, Error> {
        sqlx::query_as::<_, WorkerWithProfile>(
            r#"
            SELECT
                w.id, w.category_id, w.hourly_rate, w.years_experience,
                COALESCE(w.skills, '{}') AS skills,
                w.bio, w.location,
                COALESCE(w.available, TRUE) AS available,
                w.created_at, w.updated_at,
                p.id AS profile_id, p.full_name, p.username, p.avatar_url
            FROM workers w
            LEFT JOIN profiles p ON p.id = w.id
            WHERE w.available = TRUE
              AND ($1::INT IS NULL OR w.category_id = $1)
            ORDER BY w.created_at DESC NULLS LAST
            "#
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn upsert_worker(&self, worker: WorkerUpsert) -> Result<Worker, Error> {
        sqlx::query_as::<_, Worker>(
            r#"
            INSERT INTO workers
            (id, category_id, hourly_rate, years_experience, skills, bio, location, available, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW())
            ON CONFLICT (id) DO UPDATE
            SET category_id = EXCLUDED.category_id,
                hourly_rate = EXCLUDED.hourly_rate,
                years_experience = EXCLUDED.years_experience,
                skills = EXCLUDED.skills,
                bio = EXCLUDED.bio,
                location = EXCLUDED.location,
                available = EXCLUDED.available,
                updated_at = NOW()
            RETURNING
                id, category_id, hourly_rate, years_experience,
                COALESCE(skills, '{}') AS skills,
                bio, location,
                COALESCE(available, TRUE) AS available,
                created_at, updated_at
            "#
        )
        .bind(worker.id)
        .bind(worker.category_id)
        .bind(worker.hourly_rate)
        .bind(worker.years_experience)
        .bind(worker.skills)
        .bind(worker.bio)
        .bind(worker.location)
        .bind(worker.available)
        .fetch_one(&self.pool)
        .await
    }
}

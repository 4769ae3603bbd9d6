// db/profiledb.rs
use async_trait::async_trait;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::profilemodel::{Profile, ProfileSummary, ProfileUpdate};

#[async_trait]
pub trait ProfileExt {
    /// `Ok(None)` when the account has no profile row yet.
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>, Error>;

    /// One round-trip for a whole result set's distinct foreign keys.
    async fn get_profiles_by_ids(&self, ids: &[Uuid]) -> Result<Vec<ProfileSummary>, Error>;

    async fn upsert_profile(&self, update: ProfileUpdate) -> Result<Profile, Error>;
}

#[async_trait]
impl ProfileExt for DBClient {
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>, Error> {
        sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, full_name, username, avatar_url,
                   COALESCE(is_worker, FALSE) AS is_worker, updated_at
            FROM profiles
            WHERE id = $1
            "#
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_profiles_by_ids(&self, ids: &[Uuid]) -> Result<Vec<ProfileSummary>, Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, ProfileSummary>(
            r#"
            SELECT id, full_name, username, avatar_url
            FROM profiles
            WHERE id = ANY($1)
            "#
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
    }

    async fn upsert_profile(&self, update: ProfileUpdate) -> Result<Profile, Error> {
        sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (id, full_name, username, avatar_url, is_worker, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            ON CONFLICT (id) DO UPDATE
            SET full_name = EXCLUDED.full_name,
                username = EXCLUDED.username,
                avatar_url = EXCLUDED.avatar_url,
                is_worker = EXCLUDED.is_worker,
                updated_at = NOW()
            RETURNING id, full_name, username, avatar_url,
                      COALESCE(is_worker, FALSE) AS is_worker, updated_at
            "#
        )
        .bind(update.id)
        .bind(update.full_name)
        .bind(update.username)
        .bind(update.avatar_url)
        .bind(update.is_worker)
        .fetch_one(&self.pool)
        .await
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::BigDecimal;
use uuid::Uuid;

use super::profilemodel::ProfileSummary;

/// Worker row. `id` is the owning profile's id.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Worker {
    pub id: Uuid,
    pub category_id: Option<i32>,
    pub hourly_rate: Option<BigDecimal>,
    pub years_experience: Option<i32>,
    pub skills: Vec<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub available: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A worker row with its profile columns left-joined in. The profile
/// columns are all `None` when the join found no profile row.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct WorkerWithProfile {
    #[sqlx(flatten)]
    pub worker: Worker,
    pub profile_id: Option<Uuid>,
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
}

impl WorkerWithProfile {
    pub fn profile(&self) -> Option<ProfileSummary> {
        self.profile_id.map(|id| ProfileSummary {
            id,
            full_name: self.full_name.clone(),
            username: self.username.clone(),
            avatar_url: self.avatar_url.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkerUpsert {
    pub id: Uuid,
    pub category_id: i32,
    pub hourly_rate: Option<BigDecimal>,
    pub years_experience: Option<i32>,
    pub skills: Vec<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub available: bool,
}

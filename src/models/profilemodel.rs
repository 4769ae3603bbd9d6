use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub is_worker: bool,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Public display fields of a profile, as joined onto jobs and workers.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone, PartialEq)]
pub struct ProfileSummary {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
}

impl From<&Profile> for ProfileSummary {
    fn from(profile: &Profile) -> Self {
        ProfileSummary {
            id: profile.id,
            full_name: profile.full_name.clone(),
            username: profile.username.clone(),
            avatar_url: profile.avatar_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUpdate {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub is_worker: bool,
}

use serde::{Deserialize, Serialize};
use sqlx::types::BigDecimal;
use num_traits::Zero;
use uuid::Uuid;
use validator::Validate;

use super::error::ServiceError;
use crate::models::jobmodel::NewJob;
use crate::models::profilemodel::{Profile, ProfileUpdate};
use crate::models::workermodel::{Worker, WorkerUpsert};

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill all required fields";
pub const CATEGORY_REQUIRED_MESSAGE: &str = "Please select a category for your worker profile";

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct JobForm {
    #[validate(length(min = 1, message = "Please fill all required fields"))]
    #[serde(default)]
    pub title: String,

    #[validate(length(min = 1, message = "Please fill all required fields"))]
    #[serde(default)]
    pub description: String,

    #[validate(required(message = "Please fill all required fields"))]
    #[serde(default)]
    pub category_id: Option<i32>,

    #[serde(default)]
    pub budget: String,

    #[serde(default)]
    pub location: String,
}

impl JobForm {
    /// Validates locally and builds the insert. Nothing touches the store
    /// when this fails.
    pub fn into_new_job(self, client_id: Uuid) -> Result<NewJob, ServiceError> {
        let form = JobForm {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category_id: self.category_id,
            budget: self.budget,
            location: self.location,
        };

        form.validate()
            .map_err(|_| ServiceError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()))?;

        let budget = parse_amount(&form.budget, "Budget must be a number")?;
        let category_id = form
            .category_id
            .ok_or_else(|| ServiceError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()))?;

        Ok(NewJob {
            title: form.title,
            description: form.description,
            category_id,
            client_id,
            budget,
            location: non_empty(&form.location),
        })
    }
}

fn default_available() -> bool {
    true
}

/// Editable state of the profile page. Numeric worker fields are kept as
/// entered and only parsed on submit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub is_worker: bool,
    #[serde(default)]
    pub category_id: Option<i32>,
    #[serde(default)]
    pub hourly_rate: String,
    #[serde(default)]
    pub years_experience: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub location: String,
    #[serde(default = "default_available")]
    pub available: bool,
}

impl Default for ProfileForm {
    fn default() -> Self {
        ProfileForm {
            full_name: String::new(),
            username: String::new(),
            avatar_url: String::new(),
            is_worker: false,
            category_id: None,
            hourly_rate: String::new(),
            years_experience: String::new(),
            skills: String::new(),
            bio: String::new(),
            location: String::new(),
            available: true,
        }
    }
}

/// Parsed worker fields, before the category requirement is checked.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerFields {
    pub hourly_rate: Option<BigDecimal>,
    pub years_experience: Option<i32>,
    pub skills: Vec<String>,
}

impl ProfileForm {
    /// Merges the two independent reads. A missing worker row just leaves
    /// the worker fields at their defaults.
    pub fn from_rows(profile: Option<&Profile>, worker: Option<&Worker>) -> Self {
        let mut form = ProfileForm::default();

        if let Some(profile) = profile {
            form.full_name = profile.full_name.clone().unwrap_or_default();
            form.username = profile.username.clone().unwrap_or_default();
            form.avatar_url = profile.avatar_url.clone().unwrap_or_default();
            form.is_worker = profile.is_worker;
        }

        if let Some(worker) = worker {
            form.category_id = worker.category_id;
            form.hourly_rate = worker
                .hourly_rate
                .as_ref()
                .map(|rate| rate.normalized().to_string())
                .unwrap_or_default();
            form.years_experience = worker
                .years_experience
                .map(|years| years.to_string())
                .unwrap_or_default();
            form.skills = worker.skills.join(", ");
            form.bio = worker.bio.clone().unwrap_or_default();
            form.location = worker.location.clone().unwrap_or_default();
            form.available = worker.available;
        }

        form
    }

    pub fn basic_update(&self, user_id: Uuid) -> ProfileUpdate {
        ProfileUpdate {
            id: user_id,
            full_name: non_empty(&self.full_name),
            username: non_empty(&self.username),
            avatar_url: non_empty(&self.avatar_url),
            is_worker: self.is_worker,
        }
    }

    pub fn worker_fields(&self) -> Result<WorkerFields, ServiceError> {
        let hourly_rate = parse_amount(&self.hourly_rate, "Hourly rate must be a number")?;

        let years_experience = match self.years_experience.trim() {
            "" => None,
            raw => match raw.parse::<i32>() {
                Ok(years) if years >= 0 => Some(years),
                _ => {
                    return Err(ServiceError::Validation(
                        "Years of experience must be a whole number".to_string(),
                    ))
                }
            },
        };

        Ok(WorkerFields {
            hourly_rate,
            years_experience,
            skills: split_skills(&self.skills),
        })
    }

    pub fn worker_upsert(&self, user_id: Uuid, category_id: i32, fields: WorkerFields) -> WorkerUpsert {
        WorkerUpsert {
            id: user_id,
            category_id,
            hourly_rate: fields.hourly_rate,
            years_experience: fields.years_experience,
            skills: fields.skills,
            bio: non_empty(&self.bio),
            location: non_empty(&self.location),
            available: self.available,
        }
    }
}

/// Comma-delimited input to an ordered list. Duplicates are kept.
pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(String::from)
        .collect()
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// Empty input is absent, not zero. Parsed straight into the numeric type so
// the stored value is exactly what was typed.
fn parse_amount(raw: &str, message: &str) -> Result<Option<BigDecimal>, ServiceError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    raw.parse::<BigDecimal>()
        .ok()
        .filter(|value| *value >= BigDecimal::zero())
        .map(Some)
        .ok_or_else(|| ServiceError::Validation(message.to_string()))
}

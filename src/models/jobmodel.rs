use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::BigDecimal;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Open,
    Assigned,
    Completed,
    Cancelled,
    /// Any value the store holds outside the four known statuses.
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    pub fn to_str(&self) -> &str {
        match self {
            JobStatus::Open => "open",
            JobStatus::Assigned => "assigned",
            JobStatus::Completed => "completed",
            JobStatus::Cancelled => "cancelled",
            JobStatus::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &str {
        match self {
            JobStatus::Open => "Open",
            JobStatus::Assigned => "Assigned",
            JobStatus::Completed => "Completed",
            JobStatus::Cancelled => "Cancelled",
            JobStatus::Unknown => "Unknown",
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, JobStatus::Open)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

// Lenient: rows never fail to decode because of an unexpected status.
impl From<String> for JobStatus {
    fn from(value: String) -> Self {
        value.parse().unwrap_or(JobStatus::Unknown)
    }
}

// Strict: used for filter input, where an unknown value is a caller mistake.
impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(JobStatus::Open),
            "assigned" => Ok(JobStatus::Assigned),
            "completed" => Ok(JobStatus::Completed),
            "cancelled" => Ok(JobStatus::Cancelled),
            other => Err(format!("Unknown job status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category_id: i32,
    pub client_id: Uuid,
    pub worker_id: Option<Uuid>,
    #[sqlx(try_from = "String")]
    pub status: JobStatus,
    pub budget: Option<BigDecimal>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A job row with its category columns left-joined in.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct JobWithCategory {
    #[sqlx(flatten)]
    pub job: Job,
    pub category_name: Option<String>,
    pub category_icon: Option<String>,
}

/// Which relationship between the viewer and a job a query selects on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobScope {
    All,
    PostedBy(Uuid),
    AssignedTo(Uuid),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub category_id: i32,
    pub client_id: Uuid,
    pub budget: Option<BigDecimal>,
    pub location: Option<String>,
}

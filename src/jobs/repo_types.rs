use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::store::{Record, Repository};

pub type JobRepo = Arc<dyn Repository<Job>>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Open,
    Filled,
    Closed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

/// A worker's request to be considered; lives inside its job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub worker_id: String,
    pub status: ApplicationStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub applied_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub description: String,
    pub employer_id: String,
    pub location: String,
    pub skills_required: Vec<String>, // skill names, in the employer's order
    pub pay_rate: Option<String>,
    pub duration: Option<String>,
    pub status: JobStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub applications: Vec<Application>,
}

/// Fields an employer supplies when posting.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub skills_required: Vec<String>,
    pub pay_rate: Option<String>,
    pub duration: Option<String>,
}

impl Job {
    pub fn new(id: String, employer_id: String, new: NewJob) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            employer_id,
            location: new.location,
            skills_required: new.skills_required,
            pay_rate: new.pay_rate,
            duration: new.duration,
            status: JobStatus::Open,
            created_at: OffsetDateTime::now_utc(),
            applications: Vec::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == JobStatus::Open
    }

    pub fn has_applicant(&self, worker_id: &str) -> bool {
        self.applications.iter().any(|a| a.worker_id == worker_id)
    }
}

impl Record for Job {
    fn id(&self) -> &str {
        &self.id
    }
}

use serde::{Deserialize, Serialize};

use super::repo_types::{ApplicationStatus, Job, JobStatus};
use crate::auth::repo_types::User;

#[derive(Debug, Serialize)]
pub struct JobDetails {
    pub job: Job,
    pub employer: Option<User>,
}

#[derive(Debug, Deserialize)]
pub struct JobStatusRequest {
    pub status: JobStatus,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationDecision {
    pub status: ApplicationStatus,
}

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::proximity::{closeness, Closeness};
use crate::{
    auth::repo_types::{User, UserRepo},
    jobs::repo_types::{Job, JobRepo},
    ratings::services::RatingService,
    skills::catalog::SkillCatalog,
};

/// Added to a job's score when its location contains the worker's.
pub const LOCATION_BONUS: u32 = 1;

#[derive(Debug, Clone, Serialize)]
pub struct JobMatch {
    pub job: Job,
    pub score: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkerMatch {
    pub worker: User,
    pub score: u32,
    pub average_rating: Option<f64>,
}

/// Recommendations and search over jobs and workers.
///
/// Every method degrades to an empty or unranked list instead of failing.
#[derive(Clone)]
pub struct MatchingService {
    pub(super) users: UserRepo,
    pub(super) jobs: JobRepo,
    pub(super) ratings: RatingService,
    pub(super) catalog: Arc<SkillCatalog>,
    limit: usize,
}

impl MatchingService {
    pub fn new(
        users: UserRepo,
        jobs: JobRepo,
        ratings: RatingService,
        catalog: Arc<SkillCatalog>,
        limit: usize,
    ) -> Self {
        Self {
            users,
            jobs,
            ratings,
            catalog,
            limit,
        }
    }

    pub(super) fn skill_set(&self, entries: &[String]) -> HashSet<String> {
        entries
            .iter()
            .map(|e| self.catalog.normalized_name(e))
            .filter(|e| !e.is_empty())
            .collect()
    }

    fn overlap(&self, required: &[String], held: &HashSet<String>) -> u32 {
        self.skill_set(required).intersection(held).count() as u32
    }

    /// Open jobs the worker has not applied to, best match first.
    ///
    /// Score is the number of required skills the worker holds, plus
    /// [`LOCATION_BONUS`] when the job's location contains the worker's. A shared
    /// state alone earns nothing. Ties go to the newest job.
    pub fn recommended_jobs(&self, worker_id: &str) -> Vec<JobMatch> {
        let Some(worker) = self.users.get(worker_id).filter(User::is_worker) else {
            return Vec::new();
        };
        let held = self.skill_set(&worker.skills);
        let home = worker.location.as_deref().unwrap_or_default();

        let mut matches: Vec<JobMatch> = self
            .jobs
            .find(&|j: &Job| j.is_open() && !j.has_applicant(&worker.id))
            .into_iter()
            .map(|job| {
                let mut score = self.overlap(&job.skills_required, &held);
                if closeness(Some(job.location.as_str()), home) == Closeness::Contains {
                    score += LOCATION_BONUS;
                }
                JobMatch { job, score }
            })
            .collect();

        matches.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| b.job.created_at.cmp(&a.job.created_at))
        });
        matches.truncate(self.limit);
        debug!(%worker_id, count = matches.len(), "recommended jobs");
        matches
    }

    /// Workers scored against the employer's open jobs, best first.
    ///
    /// A worker's score is the sum of skill overlaps across those jobs; workers
    /// with no overlap are left out. Ties go to the higher average rating.
    pub fn recommended_workers(&self, employer_id: &str) -> Vec<WorkerMatch> {
        let Some(employer) = self.users.get(employer_id).filter(User::is_employer) else {
            return Vec::new();
        };
        let wanted: Vec<HashSet<String>> = self
            .jobs
            .find(&|j: &Job| j.employer_id == employer.id && j.is_open())
            .iter()
            .map(|j| self.skill_set(&j.skills_required))
            .collect();
        if wanted.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<WorkerMatch> = self
            .users
            .find(&|u: &User| u.is_worker())
            .into_iter()
            .filter_map(|worker| {
                let held = self.skill_set(&worker.skills);
                let score: u32 = wanted
                    .iter()
                    .map(|required| required.intersection(&held).count() as u32)
                    .sum();
                (score > 0).then(|| WorkerMatch {
                    average_rating: self.ratings.average_rating(&worker.id),
                    worker,
                    score,
                })
            })
            .collect();

        matches.sort_by(|a, b| {
            b.score.cmp(&a.score).then_with(|| {
                let (ra, rb) = (a.average_rating.unwrap_or(0.0), b.average_rating.unwrap_or(0.0));
                rb.partial_cmp(&ra).unwrap_or(Ordering::Equal)
            })
        });
        matches.truncate(self.limit);
        debug!(%employer_id, count = matches.len(), "recommended workers");
        matches
    }
}

use serde::Serialize;
use tracing::debug;

use super::{
    proximity::{sort_by_proximity, sort_workers_by_proximity},
    services::MatchingService,
};
use crate::{
    auth::{
        policy::{authorize, Action},
        repo_types::User,
    },
    error::{AppError, AppResult},
    jobs::repo_types::Job,
};

#[derive(Debug, Clone, Serialize)]
pub struct WorkerSummary {
    #[serde(flatten)]
    pub worker: User,
    pub average_rating: Option<f64>,
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

impl MatchingService {
    /// Open jobs whose title or description mention `term`, optionally narrowed
    /// to a location and then ordered by proximity to it.
    pub fn search_jobs(&self, term: &str, location: &str) -> Vec<Job> {
        let term = term.trim().to_lowercase();
        let place = location.trim().to_lowercase();

        let found = self.jobs.find(&|job: &Job| {
            job.is_open()
                && (contains_ci(&job.title, &term) || contains_ci(&job.description, &term))
                && (place.is_empty() || contains_ci(&job.location, &place))
        });
        debug!(%term, %place, count = found.len(), "job search");
        sort_by_proximity(found, &place)
    }

    /// Workers matching name/bio text, any of `skills`, and location. Employers only.
    pub fn search_workers(
        &self,
        actor_id: &str,
        term: &str,
        skills: &[String],
        location: &str,
    ) -> AppResult<Vec<WorkerSummary>> {
        let actor = self
            .users
            .get(actor_id)
            .ok_or_else(|| AppError::Unauthorized("User not found".into()))?;
        authorize(&actor, Action::SearchWorkers)?;

        let term = term.trim().to_lowercase();
        let place = location.trim().to_lowercase();
        let wanted = self.skill_set(skills);

        let found = self.users.find(&|u: &User| {
            u.is_worker()
                && (term.is_empty()
                    || contains_ci(&u.name, &term)
                    || u.bio.as_deref().is_some_and(|b| contains_ci(b, &term)))
                && (wanted.is_empty() || !self.skill_set(&u.skills).is_disjoint(&wanted))
                && (place.is_empty()
                    || u.location.as_deref().is_some_and(|l| contains_ci(l, &place)))
        });
        debug!(%term, %place, count = found.len(), "worker search");

        Ok(sort_workers_by_proximity(found, &place)
            .into_iter()
            .map(|worker| WorkerSummary {
                average_rating: self.ratings.average_rating(&worker.id),
                worker,
            })
            .collect())
    }
}

use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use super::repo_types::{Application, ApplicationStatus, Job, JobRepo, JobStatus, NewJob};
use crate::{
    auth::{
        policy::{authorize, Action},
        repo_types::{User, UserRepo},
    },
    error::{AppError, AppResult},
};

/// An applicant as the job owner sees them.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Applicant {
    pub worker: User,
    pub status: ApplicationStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub applied_at: OffsetDateTime,
}

/// One of the worker's own applications with job context.
#[derive(Debug, Clone, serde::Serialize)]
pub struct WorkerApplication {
    pub job_id: String,
    pub job_title: String,
    pub employer_id: String,
    pub employer_name: String,
    pub status: ApplicationStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub applied_at: OffsetDateTime,
}

#[derive(Clone)]
pub struct JobService {
    jobs: JobRepo,
    users: UserRepo,
}

impl JobService {
    pub fn new(jobs: JobRepo, users: UserRepo) -> Self {
        Self { jobs, users }
    }

    fn actor(&self, id: &str) -> AppResult<User> {
        self.users
            .get(id)
            .ok_or_else(|| AppError::Unauthorized("User not found".into()))
    }

    pub fn get_job(&self, id: &str) -> AppResult<Job> {
        self.jobs
            .get(id)
            .ok_or_else(|| AppError::NotFound("Job not found".into()))
    }

    pub fn employer_of(&self, job: &Job) -> Option<User> {
        self.users.get(&job.employer_id)
    }

    pub fn post_job(&self, actor_id: &str, new: NewJob) -> AppResult<Job> {
        let actor = self.actor(actor_id)?;
        authorize(&actor, Action::PostJob)?;

        if new.title.trim().is_empty() || new.description.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Title and description are required".into(),
            ));
        }

        let job = Job::new(Uuid::new_v4().to_string(), actor.id.clone(), new);
        self.jobs.put(job.clone());
        info!(job_id = %job.id, employer_id = %actor.id, "job posted");
        Ok(job)
    }

    /// Newest first.
    pub fn jobs_by_employer(&self, employer_id: &str) -> Vec<Job> {
        let mut jobs = self.jobs.find(&|j: &Job| j.employer_id == employer_id);
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        jobs
    }

    pub fn apply(&self, actor_id: &str, job_id: &str) -> AppResult<Application> {
        let actor = self.actor(actor_id)?;
        authorize(&actor, Action::ApplyToJob)?;

        let mut outcome: AppResult<Application> =
            Err(AppError::NotFound("Job not found".into()));
        self.jobs.update(job_id, &mut |job: &mut Job| {
            outcome = if !job.is_open() {
                Err(AppError::InvalidInput("Job is not open for applications".into()))
            } else if job.has_applicant(&actor.id) {
                Err(AppError::AlreadyExists(
                    "You have already applied for this job".into(),
                ))
            } else {
                let application = Application {
                    worker_id: actor.id.clone(),
                    status: ApplicationStatus::Pending,
                    applied_at: OffsetDateTime::now_utc(),
                };
                job.applications.push(application.clone());
                Ok(application)
            };
        });

        match &outcome {
            Ok(_) => info!(%job_id, worker_id = %actor.id, "application submitted"),
            Err(e) => warn!(%job_id, worker_id = %actor.id, error = %e, "application refused"),
        }
        outcome
    }

    /// Applicants whose worker record no longer resolves are skipped.
    pub fn applications_for(&self, actor_id: &str, job_id: &str) -> AppResult<Vec<Applicant>> {
        let actor = self.actor(actor_id)?;
        let job = self.get_job(job_id)?;
        authorize(&actor, Action::ManageJob(&job))?;

        Ok(job
            .applications
            .iter()
            .filter_map(|a| {
                self.users.get(&a.worker_id).map(|worker| Applicant {
                    worker,
                    status: a.status,
                    applied_at: a.applied_at,
                })
            })
            .collect())
    }

    pub fn worker_applications(&self, worker_id: &str) -> Vec<WorkerApplication> {
        self.jobs
            .all()
            .into_iter()
            .flat_map(|job| {
                let employer_name = self
                    .users
                    .get(&job.employer_id)
                    .map(|e| e.name)
                    .unwrap_or_else(|| "Unknown Employer".to_string());
                job.applications
                    .iter()
                    .filter(|a| a.worker_id == worker_id)
                    .map(|a| WorkerApplication {
                        job_id: job.id.clone(),
                        job_title: job.title.clone(),
                        employer_id: job.employer_id.clone(),
                        employer_name: employer_name.clone(),
                        status: a.status,
                        applied_at: a.applied_at,
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    pub fn set_job_status(&self, actor_id: &str, job_id: &str, status: JobStatus) -> AppResult<Job> {
        let actor = self.actor(actor_id)?;
        let job = self.get_job(job_id)?;
        authorize(&actor, Action::ManageJob(&job))?;

        let job = self
            .jobs
            .update(job_id, &mut |job: &mut Job| job.status = status)
            .ok_or_else(|| AppError::NotFound("Job not found".into()))?;
        info!(%job_id, status = ?status, "job status changed");
        Ok(job)
    }

    pub fn set_application_status(
        &self,
        actor_id: &str,
        job_id: &str,
        worker_id: &str,
        status: ApplicationStatus,
    ) -> AppResult<Application> {
        let actor = self.actor(actor_id)?;
        let job = self.get_job(job_id)?;
        authorize(&actor, Action::ManageJob(&job))?;

        let mut decided = None;
        self.jobs.update(job_id, &mut |job: &mut Job| {
            if let Some(a) = job.applications.iter_mut().find(|a| a.worker_id == worker_id) {
                a.status = status;
                decided = Some(a.clone());
            }
        });
        let application =
            decided.ok_or_else(|| AppError::NotFound("Application not found".into()))?;
        info!(%job_id, %worker_id, status = ?status, "application decided");
        Ok(application)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo_types::UserType;
    use crate::store::InMemoryRepository;
    use std::sync::Arc;

    struct Fixture {
        service: JobService,
    }

    fn fixture() -> Fixture {
        let users: UserRepo = Arc::new(InMemoryRepository::<User>::new());
        for (id, kind) in [
            ("emp", UserType::Employer),
            ("emp2", UserType::Employer),
            ("w1", UserType::Worker),
            ("w2", UserType::Worker),
        ] {
            users.put(User::new(id.into(), format!("{id} name"), format!("{id}@x.io"), String::new(), kind));
        }
        Fixture {
            service: JobService::new(Arc::new(InMemoryRepository::<Job>::new()), users),
        }
    }

    fn new_job(title: &str) -> NewJob {
        NewJob {
            title: title.into(),
            description: "Daily wages with meals".into(),
            location: "Thane, Maharashtra".into(),
            skills_required: vec!["Carpentry".into()],
            ..Default::default()
        }
    }

    #[test]
    fn only_employers_post_jobs() {
        let f = fixture();
        let job = f.service.post_job("emp", new_job("Carpenter")).unwrap();
        assert_eq!(job.status, JobStatus::Open);
        assert!(job.applications.is_empty());

        assert!(matches!(
            f.service.post_job("w1", new_job("Nope")),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            f.service.post_job("emp", new_job("  ")),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn jobs_by_employer_lists_own_jobs_newest_first() {
        let f = fixture();
        let now = OffsetDateTime::now_utc();
        for (title, days_old) in [("middle", 5), ("oldest", 15), ("newest", 1)] {
            let job = f.service.post_job("emp", new_job(title)).unwrap();
            f.service.jobs.update(&job.id, &mut |j: &mut Job| {
                j.created_at = now - time::Duration::days(days_old)
            });
        }
        f.service.post_job("emp2", new_job("someone else")).unwrap();

        let titles: Vec<_> = f
            .service
            .jobs_by_employer("emp")
            .into_iter()
            .map(|j| j.title)
            .collect();
        assert_eq!(titles, vec!["newest", "middle", "oldest"]);
        assert!(f.service.jobs_by_employer("w1").is_empty());
    }

    #[test]
    fn applying_twice_keeps_a_single_application() {
        let f = fixture();
        let job = f.service.post_job("emp", new_job("Carpenter")).unwrap();

        f.service.apply("w1", &job.id).unwrap();
        let second = f.service.apply("w1", &job.id);
        assert!(matches!(second, Err(AppError::AlreadyExists(_))));

        let stored = f.service.get_job(&job.id).unwrap();
        let mine = stored.applications.iter().filter(|a| a.worker_id == "w1").count();
        assert_eq!(mine, 1);
    }

    #[test]
    fn apply_checks_role_existence_and_status() {
        let f = fixture();
        let job = f.service.post_job("emp", new_job("Carpenter")).unwrap();

        assert!(matches!(f.service.apply("emp", &job.id), Err(AppError::Forbidden(_))));
        assert!(matches!(f.service.apply("w1", "missing"), Err(AppError::NotFound(_))));

        f.service.set_job_status("emp", &job.id, JobStatus::Filled).unwrap();
        assert!(matches!(f.service.apply("w2", &job.id), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn applications_are_visible_to_the_owner_only() {
        let f = fixture();
        let job = f.service.post_job("emp", new_job("Carpenter")).unwrap();
        f.service.apply("w1", &job.id).unwrap();
        f.service.apply("w2", &job.id).unwrap();

        let applicants = f.service.applications_for("emp", &job.id).unwrap();
        assert_eq!(applicants.len(), 2);
        assert_eq!(applicants[0].worker.id, "w1");

        assert!(matches!(
            f.service.applications_for("emp2", &job.id),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn dangling_applicants_are_skipped() {
        let f = fixture();
        let job = f.service.post_job("emp", new_job("Carpenter")).unwrap();
        f.service.apply("w1", &job.id).unwrap();
        assert_eq!(f.service.applications_for("emp", &job.id).unwrap().len(), 1);

        f.service
            .jobs
            .update(&job.id, &mut |j: &mut Job| j.applications[0].worker_id = "ghost".into());
        assert!(f.service.applications_for("emp", &job.id).unwrap().is_empty());
    }

    #[test]
    fn worker_applications_carry_job_context() {
        let f = fixture();
        let job = f.service.post_job("emp", new_job("Carpenter")).unwrap();
        f.service.apply("w1", &job.id).unwrap();

        let mine = f.service.worker_applications("w1");
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].job_title, "Carpenter");
        assert_eq!(mine[0].employer_name, "emp name");
        assert_eq!(mine[0].status, ApplicationStatus::Pending);
        assert!(f.service.worker_applications("w2").is_empty());
    }

    #[test]
    fn owner_decides_applications() {
        let f = fixture();
        let job = f.service.post_job("emp", new_job("Carpenter")).unwrap();
        f.service.apply("w1", &job.id).unwrap();

        let decided = f
            .service
            .set_application_status("emp", &job.id, "w1", ApplicationStatus::Accepted)
            .unwrap();
        assert_eq!(decided.status, ApplicationStatus::Accepted);
        assert!(matches!(
            f.service.set_application_status("emp", &job.id, "w2", ApplicationStatus::Rejected),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            f.service.set_job_status("emp2", &job.id, JobStatus::Closed),
            Err(AppError::Forbidden(_))
        ));
    }
}

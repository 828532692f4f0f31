use crate::{
    auth::repo_types::User,
    error::{AppError, AppResult},
    jobs::repo_types::Job,
};

/// Something a user attempts; targets travel inside the variant.
#[derive(Debug, Clone, Copy)]
pub enum Action<'a> {
    PostJob,
    ApplyToJob,
    /// View applications, change job status, decide on applicants.
    ManageJob(&'a Job),
    SearchWorkers,
    RecommendWorkers,
    RateUser(&'a str),
}

/// Single role/ownership gate consulted by every mutating operation.
pub fn authorize(actor: &User, action: Action<'_>) -> AppResult<()> {
    let allowed = match action {
        Action::PostJob => actor.is_employer(),
        Action::ApplyToJob => actor.is_worker(),
        Action::ManageJob(job) => actor.is_employer() && job.employer_id == actor.id,
        Action::SearchWorkers | Action::RecommendWorkers => actor.is_employer(),
        Action::RateUser(target) => target != actor.id,
    };
    if allowed {
        return Ok(());
    }

    tracing::warn!(actor = %actor.id, role = %actor.user_type, ?action, "action refused");
    Err(match action {
        Action::PostJob => AppError::Forbidden("Only employers can post jobs".into()),
        Action::ApplyToJob => AppError::Forbidden("Only workers can apply for jobs".into()),
        Action::ManageJob(_) => {
            AppError::Forbidden("You can only manage your own jobs".into())
        }
        Action::SearchWorkers | Action::RecommendWorkers => {
            AppError::Forbidden("Only employers can search workers".into())
        }
        Action::RateUser(_) => AppError::InvalidInput("You cannot rate yourself".into()),
    })
}

use crate::{
    auth::{
        repo_types::{User, UserRepo},
        services::AuthService,
    },
    config::AppConfig,
    jobs::{
        repo_types::{Job, JobRepo},
        services::JobService,
    },
    matching::services::MatchingService,
    messages::{repo_types::Message, services::MessageService},
    ratings::{repo_types::Rating, services::RatingService},
    seed,
    skills::catalog::SkillCatalog,
    store::InMemoryRepository,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub skills: Arc<SkillCatalog>,
    pub auth: AuthService,
    pub jobs: JobService,
    pub matching: MatchingService,
    pub messages: MessageService,
    pub ratings: RatingService,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;
        Self::from_config(config)
    }

    /// Wires every component over fresh in-memory stores, seeding them when configured.
    pub fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let users: UserRepo = Arc::new(InMemoryRepository::<User>::new());
        let jobs: JobRepo = Arc::new(InMemoryRepository::<Job>::new());

        if config.seed_sample_data {
            seed::load(&users, &jobs)?;
        }
        Ok(Self::from_parts(Arc::new(config), users, jobs))
    }

    pub fn from_parts(config: Arc<AppConfig>, users: UserRepo, jobs: JobRepo) -> Self {
        let skills = Arc::new(SkillCatalog::default());
        let ratings = RatingService::new(
            users.clone(),
            Arc::new(InMemoryRepository::<Rating>::new()),
        );
        let messages = MessageService::new(
            users.clone(),
            Arc::new(InMemoryRepository::<Message>::new()),
        );
        let matching = MatchingService::new(
            users.clone(),
            jobs.clone(),
            ratings.clone(),
            skills.clone(),
            config.recommendation_limit,
        );

        Self {
            auth: AuthService::new(users.clone()),
            jobs: JobService::new(jobs, users),
            matching,
            messages,
            ratings,
            skills,
            config,
        }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        Self::from_parts(
            Arc::new(AppConfig::for_tests()),
            Arc::new(InMemoryRepository::<User>::new()),
            Arc::new(InMemoryRepository::<Job>::new()),
        )
    }
}

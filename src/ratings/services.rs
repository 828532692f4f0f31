use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use super::repo_types::{Rating, RatingRepo, MAX_RATING, MIN_RATING};
use crate::{
    auth::{
        policy::{authorize, Action},
        repo_types::UserRepo,
    },
    error::{AppError, AppResult},
};

#[derive(Debug, Clone, Default)]
pub struct NewRating {
    pub rating: i64,
    pub comment: Option<String>,
    pub job_id: Option<String>,
}

#[derive(Clone)]
pub struct RatingService {
    users: UserRepo,
    ratings: RatingRepo,
}

impl RatingService {
    pub fn new(users: UserRepo, ratings: RatingRepo) -> Self {
        Self { users, ratings }
    }

    /// Appends a rating; the same pair may rate each other any number of times.
    pub fn add_rating(&self, rater_id: &str, rated_user_id: &str, new: NewRating) -> AppResult<Rating> {
        let rater = self
            .users
            .get(rater_id)
            .ok_or_else(|| AppError::Unauthorized("User not found".into()))?;
        authorize(&rater, Action::RateUser(rated_user_id))?;

        if !(i64::from(MIN_RATING)..=i64::from(MAX_RATING)).contains(&new.rating) {
            return Err(AppError::InvalidInput(format!(
                "Rating must be between {MIN_RATING} and {MAX_RATING}"
            )));
        }
        if self.users.get(rated_user_id).is_none() {
            return Err(AppError::NotFound("User not found".into()));
        }

        let rating = Rating {
            id: Uuid::new_v4().to_string(),
            rater_id: rater.id,
            rated_user_id: rated_user_id.to_string(),
            rating: new.rating as u8,
            comment: new.comment.filter(|c| !c.trim().is_empty()),
            timestamp: OffsetDateTime::now_utc(),
            job_id: new.job_id.filter(|j| !j.is_empty()),
        };
        self.ratings.put(rating.clone());
        info!(rating_id = %rating.id, rated = %rating.rated_user_id, value = rating.rating, "rating added");
        Ok(rating)
    }

    pub fn ratings_for(&self, user_id: &str) -> Vec<Rating> {
        self.ratings.find(&|r: &Rating| r.rated_user_id == user_id)
    }

    /// Mean of received ratings, `None` when nobody has rated the user yet.
    pub fn average_rating(&self, user_id: &str) -> Option<f64> {
        let received = self.ratings_for(user_id);
        if received.is_empty() {
            return None;
        }
        let total: u32 = received.iter().map(|r| u32::from(r.rating)).sum();
        Some(f64::from(total) / received.len() as f64)
    }
}

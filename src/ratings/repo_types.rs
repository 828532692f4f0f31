use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::store::{Record, Repository};

pub type RatingRepo = Arc<dyn Repository<Rating>>;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    pub id: String,
    pub rater_id: String,
    pub rated_user_id: String,
    pub rating: u8,
    pub comment: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub job_id: Option<String>,
}

impl Record for Rating {
    fn id(&self) -> &str {
        &self.id
    }
}

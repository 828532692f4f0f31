use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::store::{Record, Repository};

pub type MessageRepo = Arc<dyn Repository<Message>>;

/// Directed text message; only `read` changes after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub read: bool,
}

impl Message {
    /// The participant that is not `user_id`.
    pub fn partner_of(&self, user_id: &str) -> &str {
        if self.receiver_id == user_id {
            &self.sender_id
        } else {
            &self.receiver_id
        }
    }

    pub fn involves(&self, user_id: &str) -> bool {
        self.sender_id == user_id || self.receiver_id == user_id
    }
}

impl Record for Message {
    fn id(&self) -> &str {
        &self.id
    }
}

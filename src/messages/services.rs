use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, info};
use uuid::Uuid;

use super::repo_types::{Message, MessageRepo};
use crate::{
    auth::repo_types::{User, UserRepo},
    error::{AppError, AppResult},
};

/// All messages exchanged with one partner, oldest first.
#[derive(Debug, Clone, Serialize)]
pub struct Conversation {
    pub partner_id: String,
    pub partner: Option<User>,
    pub unread: usize,
    pub messages: Vec<Message>,
}

#[derive(Clone)]
pub struct MessageService {
    users: UserRepo,
    messages: MessageRepo,
}

impl MessageService {
    pub fn new(users: UserRepo, messages: MessageRepo) -> Self {
        Self { users, messages }
    }

    pub fn send(&self, sender_id: &str, receiver_id: &str, content: &str) -> AppResult<Message> {
        if receiver_id.trim().is_empty() || content.trim().is_empty() {
            return Err(AppError::InvalidInput("Missing required fields".into()));
        }
        if self.users.get(sender_id).is_none() {
            return Err(AppError::NotFound("Sender not found".into()));
        }
        if self.users.get(receiver_id).is_none() {
            return Err(AppError::NotFound("Receiver not found".into()));
        }

        let message = Message {
            id: Uuid::new_v4().to_string(),
            sender_id: sender_id.to_string(),
            receiver_id: receiver_id.to_string(),
            content: content.to_string(),
            timestamp: OffsetDateTime::now_utc(),
            read: false,
        };
        self.messages.put(message.clone());
        info!(message_id = %message.id, %sender_id, %receiver_id, "message sent");
        Ok(message)
    }

    /// Groups every message involving `user_id` by the other participant.
    ///
    /// Groups appear in the order their first message was stored.
    pub fn conversations(&self, user_id: &str) -> Vec<Conversation> {
        let mut groups: Vec<Conversation> = Vec::new();
        for message in self.messages.find(&|m: &Message| m.involves(user_id)) {
            let partner_id = message.partner_of(user_id).to_string();
            let idx = match groups.iter().position(|c| c.partner_id == partner_id) {
                Some(idx) => idx,
                None => {
                    groups.push(Conversation {
                        partner: self.users.get(&partner_id),
                        partner_id,
                        unread: 0,
                        messages: Vec::new(),
                    });
                    groups.len() - 1
                }
            };
            let group = &mut groups[idx];
            if message.receiver_id == user_id && !message.read {
                group.unread += 1;
            }
            group.messages.push(message);
        }

        for group in &mut groups {
            // stable: equal timestamps keep store order
            group.messages.sort_by_key(|m| m.timestamp);
        }
        debug!(%user_id, conversations = groups.len(), "conversations loaded");
        groups
    }

    pub fn conversation_with(&self, user_id: &str, partner_id: &str) -> Vec<Message> {
        self.conversations(user_id)
            .into_iter()
            .find(|c| c.partner_id == partner_id)
            .map(|c| c.messages)
            .unwrap_or_default()
    }

    /// Marks messages `user_id` received from `partner_id` as read; returns how many changed.
    ///
    /// A message only counts when this call is the one that flips it.
    pub fn mark_read(&self, user_id: &str, partner_id: &str) -> usize {
        let candidates = self.messages.find(&|m: &Message| {
            m.receiver_id == user_id && m.sender_id == partner_id && !m.read
        });
        let mut marked = 0;
        for message in &candidates {
            self.messages.update(&message.id, &mut |m: &mut Message| {
                if !m.read {
                    m.read = true;
                    marked += 1;
                }
            });
        }
        if marked > 0 {
            info!(%user_id, %partner_id, count = marked, "messages marked read");
        }
        marked
    }
}
